use recaman::*;

/// OEIS A005132 の先頭 71 項
const A005132: [u64; 71] = [
    0, 1, 3, 6, 2, 7, 13, 20, 12, 21, 11, 22, 10, 23, 9, 24, 8, 25, 43, 62, 42, 63, 41, 18, 42,
    17, 43, 16, 44, 15, 45, 14, 46, 79, 113, 78, 114, 77, 39, 78, 38, 79, 37, 80, 36, 81, 35, 82,
    34, 83, 33, 84, 32, 85, 31, 86, 30, 87, 29, 88, 28, 89, 27, 90, 26, 91, 157, 224, 156, 225,
    155,
];

fn render(bits: u64, bound: u64) -> String {
    let mut out = Vec::new();
    run(Mode::from_bits(bits), bound, &mut out).unwrap();
    String::from_utf8(out).unwrap()
}

#[test]
fn test_oeis_prefix() {
    let result = trace_sequence(1000).unwrap();
    assert_eq!(&result.terms[..A005132.len()], &A005132[..]);
}

/// recaman 1 20: 容量 24 を超える a(15)=24 で停止
#[test]
fn test_example_mode1_bound20() {
    let mode: Mode = "1".parse().unwrap();
    let mut out = Vec::new();
    let summary = run(mode, 20, &mut out).unwrap();
    let text = String::from_utf8(out).unwrap();
    assert!(text.starts_with("0, 1, 3, 6, 2, 7, 13, 20"));
    assert_eq!(text, "0, 1, 3, 6, 2, 7, 13, 20, 12, 21, 11, 22, 10, 23, 9\n");
    assert_eq!(summary.capacity, 24);
    assert_eq!(summary.stopped_at, Some(OutOfBounds { value: 24, capacity: 24 }));
}

#[test]
fn test_bound_100_stops_at_capacity_104() {
    let result = trace_sequence(100).unwrap();
    assert_eq!(result.terms.len(), 34);
    assert_eq!(*result.terms.last().unwrap(), 79);
    // a(34) = 79 + 34 = 113 >= 104
    assert_eq!(result.stopped_at, Some(OutOfBounds { value: 113, capacity: 104 }));
}

#[test]
fn test_larger_bounds() {
    let result = trace_sequence(1000).unwrap();
    assert_eq!(result.terms.len(), 288);
    assert_eq!(result.max_value, 833);

    let result = trace_sequence(10000).unwrap();
    assert_eq!(result.terms.len(), 2422);
    assert_eq!(result.max_value, 9197);
    assert_eq!(*result.terms.last().unwrap(), 7735);
}

#[test]
fn test_bound_100_raw_directions() {
    assert_eq!(render(0b110, 100), "xxx_xxx_x_x_x_x_xxx_x__x_x_x_x_xx\n");
}

#[test]
fn test_bound_100_oscillation_count() {
    assert_eq!(render(0b10010, 100), "1 5 2 4 \n");
}

#[test]
fn test_bound_100_oscillation_count_with_markers() {
    assert_eq!(render(0b11010, 100), "xx1xx5xx2_4x\n");
}

#[test]
fn test_bound_100_oscillation_space() {
    assert_eq!(render(0b110010, 100), "    \n");
}
