use test_case::test_case;

use crate::{DriverVersion, Error};

#[test_case("550.67", DriverVersion::new(550, 67, 0) ; "nvidia")]
#[test_case("535.104.05", DriverVersion::new(535, 104, 5) ; "nvidia_with_patch")]
#[test_case("3614.0 (HSA1.1,LC)", DriverVersion::new(3614, 0, 0) ; "amd_annotated")]
#[test_case("31.0.101.4502", DriverVersion::new(31, 0, 101) ; "intel_four_components")]
#[test_case("2023.16.7.0.21_160000", DriverVersion::new(2023, 16, 7) ; "intel_fpga")]
#[test_case("470", DriverVersion::new(470, 0, 0) ; "major_only")]
#[test_case("1.2-beta", DriverVersion::new(1, 2, 0) ; "suffix_ignored")]
fn test_driver_version_parse(input: &str, expected: DriverVersion) {
    assert_eq!(DriverVersion::parse(input).unwrap(), expected);
}

#[test_case("" ; "empty")]
#[test_case("unknown" ; "no_digits")]
#[test_case("v550.67" ; "prefixed")]
fn test_driver_version_parse_invalid(input: &str) {
    assert_eq!(DriverVersion::parse(input), Err(Error::InvalidDriverVersion { version: input.to_string() }));
}

#[test]
fn test_driver_version_ordering_is_numeric() {
    let threshold = DriverVersion::new(550, 67, 0);
    assert!("550.67".parse::<DriverVersion>().unwrap() >= threshold);
    assert!("549.99".parse::<DriverVersion>().unwrap() < threshold);
    assert!("550.7".parse::<DriverVersion>().unwrap() < threshold, "minor components compare numerically");
    assert!("550.100".parse::<DriverVersion>().unwrap() > threshold);
    assert!("551.0".parse::<DriverVersion>().unwrap() > threshold);
}

#[test]
fn test_driver_version_display() {
    assert_eq!(DriverVersion::new(550, 67, 0).to_string(), "550.67");
    assert_eq!(DriverVersion::new(535, 104, 5).to_string(), "535.104.5");
}
