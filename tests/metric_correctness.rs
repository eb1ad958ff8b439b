use imgsearch::lowlevel::locate_best;
use imgsearch::{compute_surface, ImageView, Metric, Sample};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Reference score for one placement, accumulated in f64.
fn brute_force_score<T: Sample>(
    image: ImageView<'_, T>,
    tpl: ImageView<'_, T>,
    metric: Metric,
    x: usize,
    y: usize,
) -> f64 {
    let mut dot = 0.0f64;
    let mut sse = 0.0f64;
    let mut sum_i = 0.0f64;
    let mut sum_i2 = 0.0f64;
    let mut sum_t = 0.0f64;
    let mut sum_t2 = 0.0f64;
    let mut pairs = Vec::new();

    for ty in 0..tpl.height() {
        for tx in 0..tpl.width() {
            let img_px = image.pixel(x + tx, y + ty).expect("pixel in bounds");
            let tpl_px = tpl.pixel(tx, ty).expect("pixel in bounds");
            for (&i, &t) in img_px.iter().zip(tpl_px) {
                let i = f64::from(i.to_f32());
                let t = f64::from(t.to_f32());
                dot += i * t;
                sse += (i - t) * (i - t);
                sum_i += i;
                sum_i2 += i * i;
                sum_t += t;
                sum_t2 += t * t;
                pairs.push((i, t));
            }
        }
    }

    let n = pairs.len() as f64;
    match metric {
        Metric::SqDiff => sse,
        Metric::CrossCorrelation => dot,
        Metric::Ncc => {
            let norm = (sum_t2 * sum_i2).sqrt();
            if norm > 0.0 {
                dot / norm
            } else {
                0.0
            }
        }
        Metric::SqDiffNormed => {
            let norm = (sum_t2 * sum_i2).sqrt();
            if norm > 0.0 {
                (sse / norm).min(1.0)
            } else if sse == 0.0 {
                0.0
            } else {
                1.0
            }
        }
        Metric::Zncc => {
            let mean_i = sum_i / n;
            let mean_t = sum_t / n;
            let mut cov = 0.0;
            let mut var_i = 0.0;
            let mut var_t = 0.0;
            for (i, t) in pairs {
                cov += (i - mean_i) * (t - mean_t);
                var_i += (i - mean_i) * (i - mean_i);
                var_t += (t - mean_t) * (t - mean_t);
            }
            if var_i * var_t > 1e-8 {
                cov / (var_i * var_t).sqrt()
            } else {
                0.0
            }
        }
    }
}

fn random_u8(rng: &mut StdRng, len: usize) -> Vec<u8> {
    (0..len).map(|_| rng.random_range(0..=255)).collect()
}

fn assert_surface_matches<T: Sample>(
    image: ImageView<'_, T>,
    tpl: ImageView<'_, T>,
    metric: Metric,
) {
    let surface = compute_surface(tpl, image, metric).unwrap();
    assert_eq!(surface.width(), image.width() - tpl.width() + 1);
    assert_eq!(surface.height(), image.height() - tpl.height() + 1);

    for y in 0..surface.height() {
        for x in 0..surface.width() {
            let expected = brute_force_score(image, tpl, metric, x, y);
            let got = f64::from(surface.get(x, y).unwrap());
            let tol = if metric.is_normalized() {
                1e-4
            } else {
                expected.abs() * 1e-5 + 1e-3
            };
            assert!(
                (got - expected).abs() <= tol,
                "{metric} at ({x}, {y}): got {got}, expected {expected}"
            );
        }
    }
}

#[test]
fn gray_u8_surfaces_match_bruteforce_for_all_metrics() {
    let mut rng = StdRng::seed_from_u64(7);
    let (width, height) = (23, 17);
    let image = random_u8(&mut rng, width * height);
    let tpl = random_u8(&mut rng, 5 * 4);
    let image = ImageView::from_slice(&image, width, height).unwrap();
    let tpl = ImageView::from_slice(&tpl, 5, 4).unwrap();

    for metric in Metric::ALL {
        assert_surface_matches(image, tpl, metric);
    }
}

#[test]
fn rgb_u8_surfaces_match_bruteforce_for_all_metrics() {
    let mut rng = StdRng::seed_from_u64(11);
    let (width, height) = (19, 13);
    let image = random_u8(&mut rng, width * height * 3);
    let tpl = random_u8(&mut rng, 3 * 6 * 3);
    let image = ImageView::with_channels(&image, width, height, 3).unwrap();
    let tpl = ImageView::with_channels(&tpl, 3, 6, 3).unwrap();

    for metric in Metric::ALL {
        assert_surface_matches(image, tpl, metric);
    }
}

#[test]
fn normalized_float_samples_match_bruteforce() {
    let mut rng = StdRng::seed_from_u64(3);
    let (width, height) = (16, 16);
    let image: Vec<f32> = (0..width * height).map(|_| rng.random::<f32>()).collect();
    let tpl: Vec<f32> = (0..4 * 4).map(|_| rng.random::<f32>()).collect();
    let image = ImageView::from_slice(&image, width, height).unwrap();
    let tpl = ImageView::from_slice(&tpl, 4, 4).unwrap();

    for metric in [Metric::Ncc, Metric::SqDiffNormed, Metric::Zncc, Metric::SqDiff] {
        assert_surface_matches(image, tpl, metric);
    }
}

#[test]
fn strided_image_matches_contiguous_image() {
    let mut rng = StdRng::seed_from_u64(5);
    let (width, height, stride) = (14, 9, 20);
    let padded = random_u8(&mut rng, stride * height);
    let strided = ImageView::new(&padded, width, height, stride).unwrap();
    let contiguous: Vec<u8> = (0..height)
        .flat_map(|y| strided.row(y).unwrap().to_vec())
        .collect();
    let contiguous = ImageView::from_slice(&contiguous, width, height).unwrap();
    let tpl = strided.roi(4, 3, 5, 5).unwrap();

    for metric in Metric::ALL {
        let a = compute_surface(tpl, strided, metric).unwrap();
        let b = compute_surface(tpl, contiguous, metric).unwrap();
        assert_eq!(a, b, "{metric}");
    }
}

#[test]
fn every_metric_finds_an_exact_copy() {
    let mut rng = StdRng::seed_from_u64(123);
    let (width, height) = (32, 32);
    let image = random_u8(&mut rng, width * height);
    let image = ImageView::from_slice(&image, width, height).unwrap();
    let tpl = image.roi(7, 9, 11, 9).unwrap();

    for metric in [Metric::Ncc, Metric::SqDiffNormed, Metric::SqDiff, Metric::Zncc] {
        let surface = compute_surface(tpl, image, metric).unwrap();
        let best = locate_best(&surface, metric.polarity()).unwrap();
        assert_eq!((best.x, best.y), (7, 9), "{metric}");
    }
}
