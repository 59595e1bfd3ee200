//! Bounding boxes as used for map extents and boundary culling.

use fwi_common::bbox::BoundingBox;

fn canada_west() -> BoundingBox {
    BoundingBox::new(-125.0, 49.0, -123.5, 50.0)
}

#[test]
fn test_extent_of_regular_grid() {
    let lats = [49.0, 49.5, 50.0];
    let lons = [-125.0, -124.5, -124.0, -123.5];
    let cells = lats
        .iter()
        .flat_map(|&lat| lons.iter().map(move |&lon| (lon, lat)));

    assert_eq!(BoundingBox::from_points(cells), Some(canada_west()));
}

#[test]
fn test_margin_applies_to_every_side() {
    let padded = canada_west().expand(0.5);
    assert_eq!(padded, BoundingBox::new(-125.5, 48.5, -123.0, 50.5));
    assert_eq!(padded.width(), canada_west().width() + 1.0);
    assert_eq!(padded.height(), canada_west().height() + 1.0);
}

#[test]
fn test_partial_overlap_is_symmetric() {
    let ring = BoundingBox::new(-124.0, 45.0, -110.0, 49.5);
    assert!(ring.intersects(&canada_west()));
    assert!(canada_west().intersects(&ring));
}

#[test]
fn test_disjoint_and_touching_boxes() {
    let europe = BoundingBox::new(5.0, 45.0, 10.0, 50.0);
    assert!(!europe.intersects(&canada_west()));

    let east_neighbour = BoundingBox::new(-123.5, 49.0, -120.0, 50.0);
    assert!(!east_neighbour.intersects(&canada_west()));
}

#[test]
fn test_vertical_line_inside_box() {
    let line = BoundingBox::from_points([(-124.0, 48.0), (-124.0, 51.0)]).unwrap();
    assert_eq!(line.width(), 0.0);
    assert!(line.intersects(&canada_west()));
}
