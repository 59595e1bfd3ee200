//! Tests for the scatter map renderer.

use fwi_common::BoundingBox;
use renderer::{
    draw_scatter_map, is_png, png_dimensions, render_scatter_map, Color, ColorScale, MapFrame,
    MapPoint, MapStyle, Ring, ScatterMap,
};

fn points() -> Vec<MapPoint> {
    vec![
        MapPoint { longitude: -120.0, latitude: 50.0, value: 1.0 },
        MapPoint { longitude: -110.0, latitude: 45.0, value: 5.0 },
        MapPoint { longitude: -100.0, latitude: 40.0, value: 9.0 },
    ]
}

fn style() -> MapStyle {
    MapStyle {
        width: 260,
        height: 140,
        colorbar_width: 0,
        ..MapStyle::default()
    }
}

fn extent() -> BoundingBox {
    BoundingBox::new(-120.0, 40.0, -100.0, 50.0).expand(1.0)
}

#[test]
fn test_markers_use_day_domain() {
    let pts = points();
    let map = ScatterMap { points: &pts, extent: extent(), domain: (1.0, 9.0), boundaries: &[] };
    let style = style();
    let scale = ColorScale::yl_or_rd();
    let canvas = draw_scatter_map(&map, &style, &scale).unwrap();
    let frame = MapFrame::fit(extent(), style.width, style.height, style.padding_px);

    let (x, y) = frame.project(-120.0, 50.0);
    assert_eq!(canvas.pixel(x as u32, y as u32), Some(scale.at(0.0)));

    let (x, y) = frame.project(-100.0, 40.0);
    assert_eq!(canvas.pixel(x as u32, y as u32), Some(scale.at(1.0)));

    assert_eq!(canvas.pixel(0, 0), Some(Color::WHITE));
}

#[test]
fn test_boundaries_drawn_under_markers() {
    let pts = points();
    let ring: Ring = vec![(-115.0, 41.0), (-105.0, 41.0), (-105.0, 43.0), (-115.0, 43.0)];
    let rings = vec![ring];
    let map = ScatterMap { points: &pts, extent: extent(), domain: (1.0, 9.0), boundaries: &rings };
    let style = style();
    let canvas = draw_scatter_map(&map, &style, &ColorScale::yl_or_rd()).unwrap();

    let rgba = canvas.to_rgba();
    let has_grey = rgba
        .chunks_exact(4)
        .any(|px| px[0] == px[1] && px[1] == px[2] && px[0] < 250 && px[0] > 60);
    assert!(has_grey, "boundary line should leave grey pixels");
}

#[test]
fn test_rings_outside_extent_are_skipped() {
    let pts = points();
    let style = style();
    let scale = ColorScale::yl_or_rd();
    let plain = ScatterMap { points: &pts, extent: extent(), domain: (1.0, 9.0), boundaries: &[] };

    // A ring over Europe and one with no finite vertex.
    let rings: Vec<Ring> = vec![
        vec![(5.0, 45.0), (10.0, 45.0), (10.0, 50.0), (5.0, 50.0)],
        vec![(f64::NAN, f64::NAN)],
    ];
    let culled = ScatterMap { boundaries: &rings, ..plain.clone() };

    let expected = draw_scatter_map(&plain, &style, &scale).unwrap().to_rgba();
    let actual = draw_scatter_map(&culled, &style, &scale).unwrap().to_rgba();
    assert_eq!(actual, expected);
}

#[test]
fn test_ring_crossing_extent_edge_is_drawn() {
    let pts = points();
    let style = style();
    let scale = ColorScale::yl_or_rd();
    let plain = ScatterMap { points: &pts, extent: extent(), domain: (1.0, 9.0), boundaries: &[] };

    let rings: Vec<Ring> = vec![vec![(-130.0, 44.0), (-112.0, 44.0), (-112.0, 46.0), (-130.0, 46.0)]];
    let crossing = ScatterMap { boundaries: &rings, ..plain.clone() };

    let without = draw_scatter_map(&plain, &style, &scale).unwrap().to_rgba();
    let with = draw_scatter_map(&crossing, &style, &scale).unwrap().to_rgba();
    assert_ne!(with, without);
}

#[test]
fn test_empty_map_still_renders() {
    let map = ScatterMap { points: &[], extent: extent(), domain: (0.0, 0.0), boundaries: &[] };
    let png = render_scatter_map(&map, &MapStyle::default()).unwrap();
    assert!(is_png(&png));
    assert_eq!(png_dimensions(&png), Some((800, 600)));
}

#[test]
fn test_single_value_domain() {
    let pts = vec![MapPoint { longitude: 0.0, latitude: 0.0, value: 3.0 }];
    let map = ScatterMap {
        points: &pts,
        extent: BoundingBox::new(0.0, 0.0, 0.0, 0.0).expand(1.0),
        domain: (3.0, 3.0),
        boundaries: &[],
    };
    let style = style();
    let scale = ColorScale::yl_or_rd();
    let canvas = draw_scatter_map(&map, &style, &scale).unwrap();
    let frame = MapFrame::fit(map.extent, style.width, style.height, style.padding_px);
    let (x, y) = frame.project(0.0, 0.0);
    assert_eq!(canvas.pixel(x as u32, y as u32), Some(scale.at(0.5)));
}
