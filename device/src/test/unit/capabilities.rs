use test_case::test_case;

use crate::{DeviceCapabilities, DeviceClass, DeviceId, DriverVersion, Error, Vendor};

fn builder_id() -> DeviceId {
    DeviceId::opencl(0, 0)
}

#[test_case("NVIDIA Corporation", Vendor::Nvidia ; "nvidia")]
#[test_case("Advanced Micro Devices, Inc.", Vendor::Amd ; "amd_long")]
#[test_case("AMD", Vendor::Amd ; "amd_short")]
#[test_case("Intel(R) Corporation", Vendor::Intel ; "intel")]
#[test_case("Codeplay Software Ltd.", Vendor::Codeplay ; "codeplay")]
#[test_case("Apple", Vendor::Generic ; "unknown")]
fn test_vendor_from_vendor_string(input: &str, expected: Vendor) {
    assert_eq!(Vendor::from_vendor_string(input), expected);
}

#[test]
fn test_builder_defaults() {
    let caps = DeviceCapabilities::builder()
        .id(builder_id())
        .device_class(DeviceClass::Gpu)
        .max_work_item_sizes(vec![512, 512, 64])
        .max_work_group_size(512)
        .build()
        .unwrap();

    assert_eq!(caps.vendor, Vendor::Generic);
    assert_eq!(caps.max_compute_units, 1);
    assert_eq!(caps.max_work_group_size_per_dim.as_slice(), &[512]);
    assert_eq!(caps.custom_block_sizes, [0, 0, 0]);
    assert_eq!(caps.summed_work_group_size(), 512);
    assert!(caps.name.is_empty());
}

#[test]
fn test_builder_explicit_per_dim_group_sizes() {
    let caps = DeviceCapabilities::builder()
        .id(builder_id())
        .device_class(DeviceClass::Gpu)
        .vendor(Vendor::Nvidia)
        .max_work_item_sizes(vec![1024, 1024, 64])
        .max_work_group_size(1024)
        .max_work_group_size_per_dim(vec![512, 256, 64])
        .driver_version("550.67")
        .build()
        .unwrap();

    assert_eq!(caps.summed_work_group_size(), 832);
    assert_eq!(caps.parsed_driver_version().unwrap(), DriverVersion::new(550, 67, 0));
}

#[test_case(vec![], 256 ; "no_dimensions")]
#[test_case(vec![256, 256, 64, 4], 256 ; "four_dimensions")]
#[test_case(vec![256, 0], 256 ; "zero_dimension")]
#[test_case(vec![256], 0 ; "zero_group_size")]
fn test_builder_rejects_unusable_limits(item_sizes: Vec<usize>, group_size: usize) {
    let err = DeviceCapabilities::builder()
        .id(builder_id())
        .device_class(DeviceClass::Gpu)
        .max_work_item_sizes(item_sizes)
        .max_work_group_size(group_size)
        .build()
        .unwrap_err();
    assert!(matches!(err, Error::InvalidCapabilities { .. }), "unexpected error: {err}");
}

#[test]
fn test_max_work_item_size_beyond_reported_dims() {
    let caps = DeviceCapabilities::builder()
        .id(builder_id())
        .device_class(DeviceClass::Gpu)
        .max_work_item_sizes(vec![256])
        .max_work_group_size(256)
        .build()
        .unwrap();
    assert_eq!(caps.max_work_item_size(0), 256);
    assert_eq!(caps.max_work_item_size(2), 1);
}

#[test]
fn test_fpga_and_gpu_class_accelerators() {
    let fpga = DeviceCapabilities::intel_fpga(builder_id());
    assert!(fpga.is_fpga());
    assert!(!fpga.is_gpu_class_accelerator());

    let codeplay = DeviceCapabilities { vendor: Vendor::Codeplay, platform: "ComputeCpp".into(), ..fpga.clone() };
    assert!(!codeplay.is_fpga());
    assert!(codeplay.is_gpu_class_accelerator());

    // An FPGA-named platform only counts for accelerator-class devices.
    let gpu = DeviceCapabilities { device_class: DeviceClass::Gpu, ..fpga };
    assert!(!gpu.is_fpga());
}

#[test]
fn test_presets_are_valid() {
    let id = builder_id();
    for caps in [
        DeviceCapabilities::nvidia(id),
        DeviceCapabilities::amd(id),
        DeviceCapabilities::generic_gpu(id),
        DeviceCapabilities::intel_fpga(id),
        DeviceCapabilities::cpu(id),
    ] {
        let rebuilt = DeviceCapabilities::builder()
            .id(caps.id)
            .name(caps.name.clone())
            .platform(caps.platform.clone())
            .vendor(caps.vendor)
            .device_class(caps.device_class)
            .max_compute_units(caps.max_compute_units)
            .max_work_item_sizes(caps.max_work_item_sizes.to_vec())
            .max_work_group_size(caps.max_work_group_size)
            .max_work_group_size_per_dim(caps.max_work_group_size_per_dim.to_vec())
            .driver_version(caps.driver_version.clone())
            .build()
            .unwrap();
        assert_eq!(rebuilt, caps);
        assert!(caps.parsed_driver_version().is_ok(), "{} driver version should parse", caps.name);
    }
}
