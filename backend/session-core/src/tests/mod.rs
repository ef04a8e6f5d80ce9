mod config;
mod feed;
mod protocol;
mod retry;
mod rooms;
mod support;
