//! Device session and fleet control services shared by both gateways

pub mod control;
pub mod device_manager;

pub use control::{validate_temperature, ControlAction, ControlService, DeviceStatus, Target};
pub use device_manager::DeviceManager;
