/// Advisory database adapter - a git checkout of OSV advisories
mod git_advisory_database;
mod osv_record;

pub use git_advisory_database::{GitAdvisoryDatabase, DB_PATH_ENV, DB_URL_ENV, DEFAULT_URL};
