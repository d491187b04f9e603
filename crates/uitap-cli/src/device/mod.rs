//! Everything that talks to an attached Android device: the adb shell
//! wrapper, the snapshot puller, and the search loops built on them.

pub mod puller;
pub mod search;
pub mod shell;
