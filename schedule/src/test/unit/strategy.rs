use std::sync::Arc;

use gridwise_device::{DeviceCapabilities, DeviceClass, DeviceId, Vendor};
use test_case::test_case;

use crate::test::helpers::{amd_1d, device, plan, plan_batched, strategy};
use crate::{BatchOverride, IterationDomain, SchedulerConfig, Strategy, StrategyKind, TaskOptions};

// =============================================================================
// CPU
// =============================================================================

#[test_case(&[10] ; "1d")]
#[test_case(&[1000, 20] ; "2d")]
#[test_case(&[7, 9, 11] ; "3d")]
fn test_cpu_block_scheduler(shape: &[usize]) {
    let plan = plan(DeviceCapabilities::cpu(DeviceId::opencl(0, 0)), shape).unwrap();

    assert_eq!(plan.dims(), shape.len());
    assert_eq!(plan.global_work[0], 32);
    assert!(plan.global_work[1..].iter().all(|&size| size == 1));
    assert_eq!(plan.local_work, None);
}

#[test]
fn test_cpu_thread_coarsening() {
    let strategy = strategy(DeviceCapabilities::cpu(DeviceId::opencl(0, 0)));
    let domain = IterationDomain::from_shape(&[1000, 20]).unwrap();
    let options = TaskOptions::builder().thread_coarsening(true).build();

    let plan = strategy.plan(&domain, &options, None).unwrap();
    assert_eq!(plan.global_work.as_slice(), &[1000, 20]);
    assert_eq!(plan.local_work, None);

    let batched = strategy.plan(&domain, &options, BatchOverride::new(128)).unwrap();
    assert_eq!(batched.global_work.as_slice(), &[128, 128]);
}

#[test]
fn test_cpu_coarsening_respects_single_dimension_devices() {
    let cpu = DeviceCapabilities::builder()
        .id(DeviceId::opencl(0, 0))
        .device_class(DeviceClass::Cpu)
        .max_compute_units(4)
        .max_work_item_sizes(vec![4096])
        .max_work_group_size(4096)
        .build()
        .unwrap();
    let domain = IterationDomain::from_shape(&[64, 64]).unwrap();
    let options = TaskOptions::builder().thread_coarsening(true).build();

    let plan = strategy(cpu).plan(&domain, &options, None).unwrap();
    assert_eq!(plan.global_work.as_slice(), &[64, 1]);
}

#[test]
fn test_scalar_task_launches_single_dimension() {
    let plan = strategy(DeviceCapabilities::generic_gpu(DeviceId::opencl(0, 0)))
        .plan(&IterationDomain::default(), &TaskOptions::default(), None)
        .unwrap();
    assert_eq!(plan.global_work.as_slice(), &[1]);
    assert_eq!(plan.local_work.as_deref(), Some(&[1][..]));
}

// =============================================================================
// Generic / AMD GPU
// =============================================================================

#[test]
fn test_amd_custom_block_example() {
    // 1-D, 8192 elements, max_work_item_sizes = [1024], custom block 256
    let device = amd_1d().with_custom_block_sizes([256, 0, 0]);
    let plan = plan(device, &[8192]).unwrap();

    assert_eq!(plan.global_work.as_slice(), &[8192]);
    assert_eq!(plan.local_work.as_deref(), Some(&[1024][..]));
}

#[test]
fn test_amd_irregular_adjustment_rounds_to_wavefront() {
    let config = SchedulerConfig::builder().irregular_adjustment(true).build();
    let strategy = Strategy::for_device(Arc::new(amd_1d()), &config).unwrap();
    assert_eq!(strategy.kind(), StrategyKind::Amd);

    let plan = strategy.plan(&IterationDomain::from_shape(&[1000]).unwrap(), &TaskOptions::default(), None).unwrap();
    assert_eq!(plan.global_work.as_slice(), &[1024]);
    assert_eq!(plan.local_work.as_deref(), Some(&[512][..])); // bound == global, halved
}

#[test]
fn test_generic_irregular_adjustment_rounds_to_warp() {
    let config = SchedulerConfig::builder().irregular_adjustment(true).build();
    let device = Arc::new(DeviceCapabilities::generic_gpu(DeviceId::opencl(0, 0)));
    let strategy = Strategy::for_device(device, &config).unwrap();

    let plan = strategy.plan(&IterationDomain::from_shape(&[1000]).unwrap(), &TaskOptions::default(), None).unwrap();
    assert_eq!(plan.global_work.as_slice(), &[1024]);
    assert_eq!(plan.local_work.as_deref(), Some(&[256][..]));
}

#[test]
fn test_generic_gpu_plan_has_zero_offset() {
    let domain = IterationDomain::new([crate::DomainDim::new(10, 2, 500)]).unwrap();
    let plan = strategy(DeviceCapabilities::generic_gpu(DeviceId::opencl(0, 0)))
        .plan(&domain, &TaskOptions::default(), None)
        .unwrap();

    assert_eq!(plan.global_offset.as_slice(), &[0]);
    assert_eq!(plan.global_work.as_slice(), &[500]);
    assert_eq!(plan.local_work.as_deref(), Some(&[250][..]));
}

#[test]
fn test_batch_override_replaces_cardinalities() {
    let plan = plan_batched(DeviceCapabilities::generic_gpu(DeviceId::opencl(0, 0)), &[100, 100], 64).unwrap();
    assert_eq!(plan.global_work.as_slice(), &[64, 64]);
    assert!(plan.is_divisible());
}

#[test]
fn test_custom_block_size_precedence() {
    let device = Arc::new(amd_1d().with_custom_block_sizes([16, 0, 0]));
    let config = SchedulerConfig::builder().custom_block_sizes([32, 0, 0]).build();
    let strategy = Strategy::for_device(device, &config).unwrap();

    let task = TaskOptions::builder().custom_block_sizes([64, 0, 0]).build();
    assert_eq!(strategy.custom_block_sizes(&task), [64, 0, 0]);
    assert_eq!(strategy.custom_block_sizes(&TaskOptions::default()), [32, 0, 0]);

    let device_only = Strategy::new(StrategyKind::Amd, strategy.device().clone(), SchedulerConfig::default());
    assert_eq!(device_only.custom_block_sizes(&TaskOptions::default()), [16, 0, 0]);
}

#[test]
fn test_oversized_cascade_defers_to_driver() {
    // 2-D cascade picks [512, 512], far above the 1024 group limit
    let plan = plan(device(Vendor::Intel, DeviceClass::Gpu, "31.0"), &[1024, 1024]).unwrap();
    assert_eq!(plan.global_work.as_slice(), &[1024, 1024]);
    assert_eq!(plan.local_work, None);
}

#[test]
fn test_task_block_size_above_limit_defers_to_driver() {
    let strategy = strategy(DeviceCapabilities::generic_gpu(DeviceId::opencl(0, 0)));
    let options = TaskOptions::builder().custom_block_sizes([2048, 0, 0]).build();

    let plan = strategy.plan(&IterationDomain::from_shape(&[8192]).unwrap(), &options, None).unwrap();
    assert_eq!(plan.local_work, None);
}

// =============================================================================
// NVIDIA
// =============================================================================

#[test]
fn test_nvidia_2d_plan() {
    let plan = plan(DeviceCapabilities::nvidia(DeviceId::ptx(0)), &[4096, 4096]).unwrap();
    assert_eq!(plan.global_work.as_slice(), &[4096, 4096]);
    assert_eq!(plan.local_work.as_deref(), Some(&[16, 16][..]));
}

#[test]
fn test_nvidia_1d_plan() {
    let plan = plan(DeviceCapabilities::nvidia(DeviceId::ptx(0)), &[1 << 20]).unwrap();
    assert_eq!(plan.local_work.as_deref(), Some(&[1024][..]));
}

#[test]
fn test_old_nvidia_driver_uses_generic_cascade() {
    let nvidia = DeviceCapabilities::nvidia(DeviceId::ptx(0));
    let old = DeviceCapabilities { driver_version: "470.199.02".into(), ..nvidia };
    let strategy = strategy(old);
    assert_eq!(strategy.kind(), StrategyKind::GenericGpu);

    let plan = strategy.plan(&IterationDomain::from_shape(&[4096]).unwrap(), &TaskOptions::default(), None).unwrap();
    assert_eq!(plan.local_work.as_deref(), Some(&[1024][..]));
}
