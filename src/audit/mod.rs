/// Audit domain - lockfile packages, advisories and the matching rules between them
pub mod domain;
pub mod services;
