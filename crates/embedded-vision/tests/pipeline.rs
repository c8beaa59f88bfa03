use embedded_vision::{
    BasicImage, Brightness, Connectivity, Content, Image, PoolAllocator, Rgb888, analyse_blob,
    centroid, fill_holes, label_blobs, largest_blob, normalized_central_moment,
    remove_border_blobs, threshold_otsu, to_basic,
};

fn fill_rect(img: &mut BasicImage, x0: usize, y0: usize, w: usize, h: usize, value: u8) {
    for y in y0..y0 + h {
        for x in x0..x0 + w {
            img.set_pixel(x, y, value);
        }
    }
}

fn foreground(img: &BasicImage) -> usize {
    img.data().iter().filter(|&&v| v == 1).count()
}

#[test]
fn grid_cell_blob_reports_fixture_extents() {
    let _ = env_logger::builder().is_test(true).try_init();

    // One cell of a 9 x 9 grid on a 450 x 450 canvas.
    let cell = 450 / 9;
    let mut src = BasicImage::new(450, 450).expect("alloc");
    fill_rect(&mut src, 4 * cell + 3, 2 * cell + 5, 44, 41, 1);
    src.set_content(Content::Binary);

    let mut labels = BasicImage::new(450, 450).expect("alloc");
    let count = label_blobs(&src, &mut labels, Connectivity::C8).expect("label");
    assert_eq!(count, 1);

    let info = analyse_blob(&labels, 1).expect("blob present");
    assert_eq!(info.pixel_count, 44 * 41);
    assert_eq!(info.width, 44);
    assert_eq!(info.height, 41);
    assert_eq!((info.min_x, info.min_y), (4 * cell + 3, 2 * cell + 5));
}

#[test]
fn removing_border_blobs_then_filling_holes() {
    let _ = env_logger::builder().is_test(true).try_init();

    let mut src = BasicImage::new(60, 40).expect("alloc");
    // Touches the left border.
    fill_rect(&mut src, 0, 5, 8, 6, 1);
    // Ring with a 6 x 4 hole.
    fill_rect(&mut src, 20, 10, 20, 16, 1);
    fill_rect(&mut src, 27, 16, 6, 4, 0);

    let mut cleared = BasicImage::new(60, 40).expect("alloc");
    remove_border_blobs(&src, &mut cleared, Connectivity::C8);
    assert_eq!(foreground(&cleared), 20 * 16 - 6 * 4);
    assert_eq!(cleared.pixel(0, 5), 0);

    let mut filled = BasicImage::new(60, 40).expect("alloc");
    fill_holes(&cleared, &mut filled, Connectivity::C4);
    assert_eq!(foreground(&filled), foreground(&cleared) + 6 * 4);
    assert_eq!(filled.pixel(30, 18), 1);
}

#[test]
fn color_frame_to_shape_measurements() {
    let _ = env_logger::builder().is_test(true).try_init();

    let (w, h) = (120usize, 80usize);
    let bg = Rgb888 {
        r: 200,
        g: 200,
        b: 200,
    };
    let ink = Rgb888 {
        r: 40,
        g: 40,
        b: 40,
    };
    let mut pixels = vec![bg; w * h];
    let mut paint = |x0: usize, y0: usize, rw: usize, rh: usize, px: Rgb888| {
        for y in y0..y0 + rh {
            for x in x0..x0 + rw {
                pixels[y * w + x] = px;
            }
        }
    };
    paint(10, 10, 20, 20, ink);
    paint(50, 20, 30, 30, ink);
    paint(60, 30, 10, 10, bg);
    paint(100, 0, 20, 10, ink);

    let frame = Image::from_vec(w, h, pixels).expect("valid frame");
    let gray = to_basic(&frame).expect("convert");

    let mut binary = BasicImage::new(w, h).expect("alloc");
    let t = threshold_otsu(&gray, &mut binary, Brightness::Dark);
    assert!(t < 150, "threshold {t}");

    let mut cleared = BasicImage::new(w, h).expect("alloc");
    remove_border_blobs(&binary, &mut cleared, Connectivity::C8);
    let mut filled = BasicImage::new(w, h).expect("alloc");
    fill_holes(&cleared, &mut filled, Connectivity::C8);
    let mut labels = BasicImage::new(w, h).expect("alloc");
    let count = label_blobs(&filled, &mut labels, Connectivity::C8).expect("label");
    assert_eq!(count, 2);

    let square = analyse_blob(&labels, 1).expect("square");
    assert_eq!((square.width, square.height, square.pixel_count), (20, 20, 400));
    assert_eq!(centroid(&labels, 1), Ok((19, 19)));

    let (label, ring) = largest_blob(&labels, count).expect("blobs");
    assert_eq!(label, 2);
    assert_eq!(ring.pixel_count, 900);

    let eta20 = normalized_central_moment(&labels, 1, 2, 0).expect("square");
    let eta02 = normalized_central_moment(&labels, 1, 0, 2).expect("square");
    approx::assert_relative_eq!(eta20, eta02, epsilon = 1e-12);
}

#[test]
fn pooled_frames_run_the_same_pipeline() {
    let pool = PoolAllocator::new(3, 64 * 64).expect("pool");
    let mut src = BasicImage::new_in(64, 64, &pool).expect("slot");
    fill_rect(&mut src, 20, 20, 10, 10, 1);
    let mut labels = BasicImage::new_in(64, 64, &pool).expect("slot");

    assert_eq!(label_blobs(&src, &mut labels, Connectivity::C4), Ok(1));
    assert_eq!(centroid(&labels, 1), Ok((24, 24)));

    src.destroy_in(&pool);
    labels.destroy_in(&pool);
    assert_eq!(pool.available(), 3);
}
