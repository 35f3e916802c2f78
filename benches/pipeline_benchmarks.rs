//! Benchmarks for the landmark-to-emotion pipeline

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use face_emotion_estimation::classifier::{EmotionClassifier, EmotionLabel, EmotionResult};
use face_emotion_estimation::config::Config;
use face_emotion_estimation::constants::NUM_FACE_LANDMARKS;
use face_emotion_estimation::detector::RuleDetector;
use face_emotion_estimation::features::extract_features;
use face_emotion_estimation::landmarks::{index, Point};
use face_emotion_estimation::smoother::EmotionSmoother;

/// A plausible face with per-point jitter, simulating landmark noise
fn jittered_face() -> Vec<Point> {
    let mut landmarks: Vec<Point> = (0..NUM_FACE_LANDMARKS)
        .map(|_| {
            Point::new(
                0.5 + 0.01 * (rand::random::<f32>() - 0.5),
                0.5 + 0.01 * (rand::random::<f32>() - 0.5),
                0.0,
            )
        })
        .collect();

    landmarks[index::LEFT_CHEEK] = Point::new(0.2, 0.5, 0.0);
    landmarks[index::RIGHT_CHEEK] = Point::new(0.8, 0.5, 0.0);
    landmarks[index::BROW_CENTER] = Point::new(0.5, 0.25, 0.0);
    landmarks[index::CHIN] = Point::new(0.5, 0.85, 0.0);
    landmarks[index::LEFT_MOUTH_CORNER] = Point::new(0.41, 0.682, 0.0);
    landmarks[index::RIGHT_MOUTH_CORNER] = Point::new(0.59, 0.682, 0.0);
    landmarks[index::UPPER_LIP_CENTER] = Point::new(0.5, 0.68, 0.0);
    landmarks[index::LOWER_LIP_CENTER] = Point::new(0.5, 0.72, 0.0);
    landmarks[index::TOP_LIP] = Point::new(0.5, 0.69, 0.0);
    landmarks[index::BOTTOM_LIP] = Point::new(0.5, 0.71, 0.0);

    landmarks
}

fn benchmark_extraction(c: &mut Criterion) {
    let landmarks = jittered_face();

    c.bench_function("extract_features", |b| {
        b.iter(|| black_box(extract_features(black_box(&landmarks))));
    });
}

fn benchmark_classification(c: &mut Criterion) {
    let landmarks = jittered_face();
    let features = extract_features(&landmarks).expect("valid synthetic face");
    let classifier = EmotionClassifier::default();

    c.bench_function("classify", |b| {
        b.iter(|| black_box(classifier.classify(black_box(&features))));
    });
}

fn benchmark_full_frame(c: &mut Criterion) {
    let mut group = c.benchmark_group("frame_pipeline");

    // 100 noisy frames, the cadence of a long scan
    let frames: Vec<Vec<Point>> = (0..100).map(|_| jittered_face()).collect();

    group.bench_function("raw", |b| {
        let mut detector = RuleDetector::default();
        b.iter(|| {
            for frame in &frames {
                black_box(detector.predict(black_box(frame)));
            }
        });
    });

    group.bench_function("smoothed", |b| {
        let mut config = Config::default();
        config.smoothing.enabled = true;
        let mut detector = RuleDetector::new(&config);
        b.iter(|| {
            for frame in &frames {
                black_box(detector.predict(black_box(frame)));
            }
        });
    });

    group.finish();
}

fn benchmark_smoother(c: &mut Criterion) {
    let results: Vec<EmotionResult> = (0..100)
        .map(|i| {
            let label = if i % 7 == 0 {
                EmotionLabel::Sad
            } else {
                EmotionLabel::Happy
            };
            EmotionResult::new(label, 60.0 + (i % 30) as f32)
        })
        .collect();

    c.bench_function("smoother_push_100", |b| {
        let mut smoother = EmotionSmoother::new(5);
        b.iter(|| {
            smoother.reset();
            for result in &results {
                black_box(smoother.push(black_box(*result)));
            }
        });
    });
}

criterion_group!(
    benches,
    benchmark_extraction,
    benchmark_classification,
    benchmark_full_frame,
    benchmark_smoother
);
criterion_main!(benches);
