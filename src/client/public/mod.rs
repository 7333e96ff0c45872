mod config_ops;
mod connect_ops;
