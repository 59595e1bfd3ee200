//! Tests for histogram bar charts.

use renderer::{draw_histogram, is_png, png_dimensions, render_histogram, ChartStyle};

#[test]
fn test_tallest_bar_reaches_top() {
    let style = ChartStyle { width: 330, height: 130, padding: 15, ..ChartStyle::default() };
    let mut counts = vec![0u64; 30];
    counts[0] = 10;
    counts[29] = 5;
    let canvas = draw_histogram(&counts, &style).unwrap();

    // First bar spans x in [15.5, 25.5), full height from y=15 to y=115.
    assert_eq!(canvas.pixel(20, 16), Some(style.bar_color));
    // Last bar is half height.
    assert_eq!(canvas.pixel(310, 16), Some(style.background));
    assert_eq!(canvas.pixel(310, 100), Some(style.bar_color));
    // Empty bin
    assert_eq!(canvas.pixel(160, 100), Some(style.background));
}

#[test]
fn test_chart_encodes_as_indexed_png() {
    let counts: Vec<u64> = (0..30).map(|i| (i * 7 % 11) as u64).collect();
    let png = render_histogram(&counts, &ChartStyle::default()).unwrap();
    assert!(is_png(&png));
    assert_eq!(png_dimensions(&png), Some((800, 400)));
    assert_eq!(png[25], 3);
}

#[test]
fn test_all_zero_counts() {
    let png = render_histogram(&[0; 30], &ChartStyle::default()).unwrap();
    assert!(is_png(&png));
}
