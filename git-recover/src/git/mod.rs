//! Git integration for git-recover.
//!
//! Blocking git invocations never run on the event loop. A small pool of
//! `std::thread` workers shares one crossbeam request channel and posts results
//! back as `AppEvent::GitResult`.
pub mod highlight;
pub mod types;
pub mod worker;
