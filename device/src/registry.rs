use std::collections::HashMap;
use std::sync::Arc;

use once_cell::sync::Lazy;
use parking_lot::RwLock;

use crate::capabilities::DeviceCapabilities;
use crate::error::{DeviceNotFoundSnafu, Result};
use crate::id::DeviceId;

/// Snapshot of every device found during discovery.
///
/// Capabilities are immutable once registered: a second registration for the
/// same [`DeviceId`] returns the snapshot that is already stored.
pub struct DeviceRegistry {
    devices: RwLock<HashMap<DeviceId, Arc<DeviceCapabilities>>>,
}

impl DeviceRegistry {
    pub fn new() -> Self {
        Self { devices: RwLock::new(HashMap::new()) }
    }

    /// Register a discovered device.
    pub fn register(&self, capabilities: DeviceCapabilities) -> Arc<DeviceCapabilities> {
        // Fast path: read lock
        if let Some(existing) = self.devices.read().get(&capabilities.id) {
            tracing::debug!(device = %capabilities.id, "device already discovered, keeping first snapshot");
            return Arc::clone(existing);
        }

        let mut devices = self.devices.write();

        // Double-check after acquiring write lock
        if let Some(existing) = devices.get(&capabilities.id) {
            return Arc::clone(existing);
        }

        tracing::debug!(
            device = %capabilities.id,
            name = %capabilities.name,
            vendor = %capabilities.vendor,
            class = %capabilities.device_class,
            "device discovered"
        );
        let arc = Arc::new(capabilities);
        devices.insert(arc.id, Arc::clone(&arc));
        arc
    }

    /// Get the capabilities of a discovered device.
    pub fn get(&self, id: &DeviceId) -> Result<Arc<DeviceCapabilities>> {
        self.devices.read().get(id).cloned().ok_or_else(|| DeviceNotFoundSnafu { id: *id }.build())
    }

    /// Get a device by parsing a device string.
    pub fn get_device(&self, device: &str) -> Result<Arc<DeviceCapabilities>> {
        let id = DeviceId::parse(device)?;
        self.get(&id)
    }

    /// All discovered devices, ordered by id.
    pub fn devices(&self) -> Vec<Arc<DeviceCapabilities>> {
        let mut devices: Vec<_> = self.devices.read().values().cloned().collect();
        devices.sort_by_key(|caps| caps.id);
        devices
    }
}

impl Default for DeviceRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Global device registry instance.
static REGISTRY: Lazy<DeviceRegistry> = Lazy::new(DeviceRegistry::new);

/// Get the global device registry.
pub fn registry() -> &'static DeviceRegistry {
    &REGISTRY
}

/// Convenience function to get a discovered device by string.
pub fn get_device(device: &str) -> Result<Arc<DeviceCapabilities>> {
    registry().get_device(device)
}
