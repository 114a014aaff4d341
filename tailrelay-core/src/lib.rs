pub mod cli;
pub mod conf;
pub mod logging;
pub mod logs;
pub mod migration;
pub mod transport;
pub mod update;
