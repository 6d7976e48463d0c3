/// Inbound ports (Driving ports) - Command interfaces
///
/// These ports define the interface that the CLI adapter uses
/// to drive the application core.
pub mod audit_command_port;

pub use audit_command_port::AuditCommandPort;
