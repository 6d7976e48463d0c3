/// Scanner adapter - audits uv.lock files against an advisory database
mod lockfile_scanner;
mod uv_lock;

pub use lockfile_scanner::LockfileScanner;
pub use uv_lock::{parse_uv_lock, LockedPackage};
