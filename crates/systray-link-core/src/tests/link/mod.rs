mod codec;
mod link_controller;
