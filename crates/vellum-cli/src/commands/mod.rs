//! Command implementations.

pub mod event;
pub mod run;
pub mod show;
pub mod watch;

pub use self::event::execute_event;
pub use self::run::execute_run;
pub use self::show::execute_show;
pub use self::watch::execute_watch;
