mod bootstrap;
mod transfer;
mod trust;
