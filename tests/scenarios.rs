use image::{Rgba, RgbaImage};
use image_to_vector_wasm::{
    Point, VectorizeConfig, VectorizeError, Vectorizer, extract_palette, rank_palette, trace_polygons, vectorize,
};

const RED: Rgba<u8> = Rgba([255, 0, 0, 255]);
const BLUE: Rgba<u8> = Rgba([0, 0, 255, 255]);

fn config(min_area: f64, simplify: f32) -> VectorizeConfig {
    VectorizeConfig {
        min_area,
        simplify,
        ..Default::default()
    }
}

fn halves() -> RgbaImage {
    RgbaImage::from_fn(4, 4, |_, y| if y < 2 { RED } else { BLUE })
}

#[test]
fn solid_square_is_one_polygon() {
    let img = RgbaImage::from_pixel(2, 2, RED);
    let (polygons, stats) = trace_polygons(&img, &config(0.0, 1.0)).unwrap();
    assert_eq!(stats.discovered, 1);
    assert_eq!(polygons.len(), 1);
    assert_eq!(polygons[0].points.len(), 4);

    let svg = vectorize(&img, &config(0.0, 1.0)).unwrap();
    assert_eq!(
        svg,
        concat!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 2 2">"#,
            r##"<polygon points="0,0 0,1 1,1 1,0" fill="#FF0000" stroke="none"/>"##,
            "</svg>"
        )
    );
}

#[test]
fn two_halves_in_discovery_order() {
    let img = halves();
    let (polygons, _) = trace_polygons(&img, &config(1.0, 1.0)).unwrap();
    assert_eq!(polygons.len(), 2);
    assert_eq!(polygons[0].points.len(), 8);
    assert_eq!(polygons[1].points.len(), 8);

    let svg = vectorize(&img, &config(1.0, 1.0)).unwrap();
    let red = svg.find(r##"fill="#FF0000""##).unwrap();
    let blue = svg.find(r##"fill="#0000FF""##).unwrap();
    assert!(red < blue);
    assert_eq!(svg.matches("<polygon").count(), 2);
}

#[test]
fn palette_filter_without_match_emits_nothing() {
    let img = RgbaImage::from_pixel(5, 3, RED);
    let cfg = VectorizeConfig {
        palette: Some(vec!["#00FF00".into()]),
        ..config(0.0, 0.35)
    };
    let (polygons, stats) = trace_polygons(&img, &cfg).unwrap();
    assert!(polygons.is_empty());
    assert_eq!(stats.filtered_pixels, 15);
    assert!(!vectorize(&img, &cfg).unwrap().contains("<polygon"));
}

#[test]
fn palette_filter_is_case_insensitive() {
    let cfg = VectorizeConfig {
        palette: Some(vec!["#0000ff".into()]),
        ..config(1.0, 1.0)
    };
    let (polygons, _) = trace_polygons(&halves(), &cfg).unwrap();
    assert_eq!(polygons.len(), 1);
    assert_eq!(polygons[0].points[0], Point { x: 0, y: 2 });
}

#[test]
fn single_pixel_is_discarded() {
    let img = RgbaImage::from_pixel(1, 1, RED);
    for min_area in [0.0, 8.0] {
        let (polygons, stats) = trace_polygons(&img, &config(min_area, 0.35)).unwrap();
        assert!(polygons.is_empty());
        assert_eq!(stats.too_few_points, 1);
    }
}

#[test]
fn default_simplify_decimates_points() {
    let img = RgbaImage::from_pixel(2, 2, RED);
    let (polygons, _) = trace_polygons(&img, &config(0.0, 0.35)).unwrap();
    assert_eq!(polygons[0].points, vec![Point { x: 0, y: 0 }]);
}

#[test]
fn empty_image_gives_empty_outputs() {
    let img = RgbaImage::new(0, 0);
    assert!(extract_palette(&img, &VectorizeConfig::default()).unwrap().is_empty());
    assert_eq!(
        vectorize(&img, &VectorizeConfig::default()).unwrap(),
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 0 0"></svg>"#
    );
}

#[test]
fn palette_is_ranked_by_frequency() {
    // 12 blue, 4 red
    let img = RgbaImage::from_fn(4, 4, |_, y| if y == 0 { RED } else { BLUE });
    let cfg = VectorizeConfig { k: 2, ..Default::default() };
    assert_eq!(extract_palette(&img, &cfg).unwrap(), vec!["#0000FF", "#FF0000"]);

    let ranked = rank_palette(&img, &cfg).unwrap();
    assert_eq!(ranked.iter().map(|r| r.count).collect::<Vec<_>>(), vec![12, 4]);
}

#[test]
fn transparent_pixels_are_left_out_of_palette_counts() {
    let img = RgbaImage::from_fn(4, 4, |x, _| if x == 0 { Rgba([0, 0, 0, 0]) } else { RED });
    let ranked = rank_palette(&img, &VectorizeConfig::default()).unwrap();
    assert_eq!(ranked.len(), 1);
    assert_eq!(ranked[0].count, 12);

    // ...but still traced as a region of their own.
    let (polygons, _) = trace_polygons(&img, &config(0.0, 1.0)).unwrap();
    assert_eq!(polygons.len(), 2);
}

#[test]
fn vectorizer_requires_an_attached_image() {
    let mut session = Vectorizer::new(config(1.0, 1.0)).unwrap();
    assert!(matches!(session.vectorize(), Err(VectorizeError::BackendUnavailable(_))));
    assert!(matches!(session.palette(), Err(VectorizeError::BackendUnavailable(_))));

    session.attach(halves());
    assert!(session.is_attached());
    assert_eq!(session.vectorize().unwrap().matches("<polygon").count(), 2);
    assert_eq!(session.palette().unwrap(), vec!["#FF0000", "#0000FF"]);

    session.detach();
    assert!(matches!(session.vectorize(), Err(VectorizeError::BackendUnavailable(_))));
}

#[test]
fn invalid_configuration_is_rejected() {
    let img = RgbaImage::from_pixel(2, 2, RED);
    let cfg = VectorizeConfig { k: 0, ..Default::default() };
    assert!(matches!(extract_palette(&img, &cfg), Err(VectorizeError::InvalidParameter(_))));
    let cfg = VectorizeConfig {
        palette: Some(vec!["not-a-color".into()]),
        ..Default::default()
    };
    assert!(matches!(vectorize(&img, &cfg), Err(VectorizeError::InvalidParameter(_))));
    assert!(Vectorizer::new(VectorizeConfig { simplify: 2.0, ..Default::default() }).is_err());
}

#[test]
fn encoded_images_round_trip_through_decoder() {
    let mut png = Vec::new();
    halves()
        .write_to(&mut std::io::Cursor::new(&mut png), image::ImageFormat::Png)
        .unwrap();
    let svg = image_to_vector_wasm::vectorize_bytes(&png, &config(1.0, 1.0)).unwrap();
    assert_eq!(svg.matches("<polygon").count(), 2);
    let palette = image_to_vector_wasm::extract_palette_bytes(&png, &VectorizeConfig::default()).unwrap();
    assert_eq!(palette, vec!["#FF0000", "#0000FF"]);
    assert!(matches!(
        image_to_vector_wasm::vectorize_bytes(b"not an image", &VectorizeConfig::default()),
        Err(VectorizeError::Decode(_))
    ));
}
