//! Hardware limits and identity of a target accelerator.
//!
//! [`DeviceCapabilities`] is the snapshot produced by device discovery and read
//! by every scheduling decision. It is built once, shared as `Arc`, and never
//! mutated afterwards.

use bon::bon;
use smallvec::SmallVec;
use snafu::ensure;

use crate::driver::DriverVersion;
use crate::error::{InvalidCapabilitiesSnafu, Result};
use crate::id::DeviceId;

/// Per-dimension sizes (at most three launch dimensions).
pub type Dims = SmallVec<[usize; 3]>;

/// Maximum number of launch dimensions supported by any backend.
pub const MAX_DIMS: usize = 3;

/// Hardware vendor, derived from the vendor string reported by the driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[derive(strum::Display, strum::VariantArray)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Vendor {
    #[strum(serialize = "AMD")]
    Amd,
    #[strum(serialize = "NVIDIA")]
    Nvidia,
    Intel,
    Codeplay,
    Generic,
}

impl Vendor {
    /// Classify a driver-reported vendor string.
    ///
    /// Examples:
    /// - "NVIDIA Corporation" -> Nvidia
    /// - "Advanced Micro Devices, Inc." -> Amd
    /// - "Intel(R) Corporation" -> Intel
    /// - "Codeplay Software Ltd." -> Codeplay
    pub fn from_vendor_string(vendor: &str) -> Self {
        let vendor = vendor.to_lowercase();
        if vendor.contains("nvidia") {
            Self::Nvidia
        } else if vendor.contains("advanced micro devices") || vendor.contains("amd") {
            Self::Amd
        } else if vendor.contains("codeplay") {
            Self::Codeplay
        } else if vendor.contains("intel") {
            Self::Intel
        } else {
            Self::Generic
        }
    }
}

/// Device class as reported by the driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[derive(strum::Display, strum::VariantArray)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DeviceClass {
    #[strum(serialize = "CPU")]
    Cpu,
    #[strum(serialize = "GPU")]
    Gpu,
    Accelerator,
    /// Vendor-specific device type with no scheduling support.
    Custom,
}

/// Description of a target accelerator's hardware limits and identity.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DeviceCapabilities {
    /// Device identity (backend, platform, device index).
    pub id: DeviceId,

    /// Human-readable device name (e.g. "NVIDIA GeForce RTX 4090").
    pub name: String,

    /// Platform name the device was discovered on (e.g. "Intel(R) FPGA SDK for OpenCL(TM)").
    pub platform: String,

    pub vendor: Vendor,

    pub device_class: DeviceClass,

    /// Number of compute units (SMs / CUs / cores).
    pub max_compute_units: usize,

    /// Per-dimension maximum work-item counts.
    pub max_work_item_sizes: Dims,

    /// Maximum number of work-items in a single work-group.
    pub max_work_group_size: usize,

    /// Work-group size maxima as reported by the driver.
    ///
    /// Drivers typically report a single entry equal to `max_work_group_size`;
    /// the NVIDIA adaptation pass sums this list to obtain its ceiling.
    pub max_work_group_size_per_dim: Dims,

    /// Raw driver version string.
    pub driver_version: String,

    /// Configured block sizes per dimension (0 = unset).
    pub custom_block_sizes: [usize; MAX_DIMS],
}

#[bon]
impl DeviceCapabilities {
    /// Create a capabilities snapshot, validating the reported limits.
    #[builder]
    pub fn new(
        id: DeviceId,
        #[builder(into, default)] name: String,
        #[builder(into, default)] platform: String,
        #[builder(default = Vendor::Generic)] vendor: Vendor,
        device_class: DeviceClass,
        #[builder(default = 1)] max_compute_units: usize,
        max_work_item_sizes: Vec<usize>,
        max_work_group_size: usize,
        max_work_group_size_per_dim: Option<Vec<usize>>,
        #[builder(into, default)] driver_version: String,
        #[builder(default)] custom_block_sizes: [usize; MAX_DIMS],
    ) -> Result<Self> {
        ensure!(
            !max_work_item_sizes.is_empty() && max_work_item_sizes.len() <= MAX_DIMS,
            InvalidCapabilitiesSnafu { id, reason: "max_work_item_sizes must report 1 to 3 dimensions" }
        );
        ensure!(
            max_work_item_sizes.iter().all(|&size| size > 0),
            InvalidCapabilitiesSnafu { id, reason: "max_work_item_sizes must be positive" }
        );
        ensure!(
            max_work_group_size > 0,
            InvalidCapabilitiesSnafu { id, reason: "max_work_group_size must be positive" }
        );
        ensure!(max_compute_units > 0, InvalidCapabilitiesSnafu { id, reason: "max_compute_units must be positive" });

        let per_dim = max_work_group_size_per_dim.unwrap_or_else(|| vec![max_work_group_size]);
        ensure!(
            !per_dim.is_empty(),
            InvalidCapabilitiesSnafu { id, reason: "max_work_group_size_per_dim must not be empty" }
        );

        Ok(Self {
            id,
            name,
            platform,
            vendor,
            device_class,
            max_compute_units,
            max_work_item_sizes: Dims::from_vec(max_work_item_sizes),
            max_work_group_size,
            max_work_group_size_per_dim: Dims::from_vec(per_dim),
            driver_version,
            custom_block_sizes,
        })
    }
}

impl DeviceCapabilities {
    /// Maximum work-items along `dim`; dimensions the driver does not report are capped at 1.
    pub fn max_work_item_size(&self, dim: usize) -> usize {
        self.max_work_item_sizes.get(dim).copied().unwrap_or(1)
    }

    /// Sum of the reported per-dimension work-group maxima.
    pub fn summed_work_group_size(&self) -> usize {
        self.max_work_group_size_per_dim.iter().sum()
    }

    /// Parsed driver version.
    pub fn parsed_driver_version(&self) -> Result<DriverVersion> {
        DriverVersion::parse(&self.driver_version)
    }

    /// Whether this device lives on an FPGA platform.
    pub fn is_fpga(&self) -> bool {
        let platform = self.platform.to_lowercase();
        self.device_class == DeviceClass::Accelerator
            && (platform.contains("fpga") || platform.contains("altera") || platform.contains("xilinx"))
    }

    /// Whether this accelerator behaves like a GPU (e.g. Codeplay's ComputeCpp platform).
    pub fn is_gpu_class_accelerator(&self) -> bool {
        self.device_class == DeviceClass::Accelerator
            && (self.vendor == Vendor::Codeplay || self.platform.to_lowercase().contains("codeplay"))
    }

    /// Replace the configured block sizes.
    pub fn with_custom_block_sizes(mut self, custom_block_sizes: [usize; MAX_DIMS]) -> Self {
        self.custom_block_sizes = custom_block_sizes;
        self
    }

    /// NVIDIA discrete GPU (Ada, driver 550.67).
    pub fn nvidia(id: DeviceId) -> Self {
        Self {
            id,
            name: "NVIDIA GeForce RTX 4090".to_string(),
            platform: "NVIDIA CUDA".to_string(),
            vendor: Vendor::Nvidia,
            device_class: DeviceClass::Gpu,
            max_compute_units: 128,
            max_work_item_sizes: Dims::from_slice(&[1024, 1024, 64]),
            max_work_group_size: 1024,
            max_work_group_size_per_dim: Dims::from_slice(&[1024]),
            driver_version: "550.67".to_string(),
            custom_block_sizes: [0; MAX_DIMS],
        }
    }

    /// AMD discrete GPU (RDNA3, wavefront 64).
    pub fn amd(id: DeviceId) -> Self {
        Self {
            id,
            name: "AMD Radeon RX 7900 XTX".to_string(),
            platform: "AMD Accelerated Parallel Processing".to_string(),
            vendor: Vendor::Amd,
            device_class: DeviceClass::Gpu,
            max_compute_units: 96,
            max_work_item_sizes: Dims::from_slice(&[1024, 1024, 1024]),
            max_work_group_size: 1024,
            max_work_group_size_per_dim: Dims::from_slice(&[1024]),
            driver_version: "3614.0 (HSA1.1,LC)".to_string(),
            custom_block_sizes: [0; MAX_DIMS],
        }
    }

    /// Integrated GPU with conservative limits and an unknown vendor.
    pub fn generic_gpu(id: DeviceId) -> Self {
        Self {
            id,
            name: "Generic OpenCL GPU".to_string(),
            platform: "Generic OpenCL".to_string(),
            vendor: Vendor::Generic,
            device_class: DeviceClass::Gpu,
            max_compute_units: 16,
            max_work_item_sizes: Dims::from_slice(&[256, 256, 64]),
            max_work_group_size: 256,
            max_work_group_size_per_dim: Dims::from_slice(&[256]),
            driver_version: "1.0".to_string(),
            custom_block_sizes: [0; MAX_DIMS],
        }
    }

    /// Intel FPGA accelerator (emulated board).
    pub fn intel_fpga(id: DeviceId) -> Self {
        Self {
            id,
            name: "Intel(R) FPGA Emulation Device".to_string(),
            platform: "Intel(R) FPGA Emulation Platform for OpenCL(TM)".to_string(),
            vendor: Vendor::Intel,
            device_class: DeviceClass::Accelerator,
            max_compute_units: 8,
            max_work_item_sizes: Dims::from_slice(&[67108864, 67108864, 67108864]),
            max_work_group_size: 67108864,
            max_work_group_size_per_dim: Dims::from_slice(&[67108864]),
            driver_version: "2023.16.7.0.21_160000".to_string(),
            custom_block_sizes: [0; MAX_DIMS],
        }
    }

    /// Multi-core CPU exposed through OpenCL.
    pub fn cpu(id: DeviceId) -> Self {
        Self {
            id,
            name: "Intel(R) Core(TM) i9-13900K".to_string(),
            platform: "Intel(R) OpenCL".to_string(),
            vendor: Vendor::Intel,
            device_class: DeviceClass::Cpu,
            max_compute_units: 32,
            max_work_item_sizes: Dims::from_slice(&[8192, 8192, 8192]),
            max_work_group_size: 8192,
            max_work_group_size_per_dim: Dims::from_slice(&[8192]),
            driver_version: "2023.16.7.0.21_160000".to_string(),
            custom_block_sizes: [0; MAX_DIMS],
        }
    }
}
