use blobmatch::lowlevel::{collect_blobs, filter_blobs, label_two_pass};
use blobmatch::{
    BackgroundThreshold, Blob, BlobCounter, BlobCounterConfig, BlobFilter, BlobMatchError,
    ForegroundRule, PixelFormat, PixelView, Rect,
};

const WIDTH: usize = 16;
const HEIGHT: usize = 12;

/// Three separated blocks: 2x2 at (1,1), 4x3 at (6,1), 2x5 at (12,4).
fn scene() -> Vec<u8> {
    let mut data = vec![0u8; WIDTH * HEIGHT];
    for rect in [
        Rect::new(1, 1, 2, 2),
        Rect::new(6, 1, 4, 3),
        Rect::new(12, 4, 2, 5),
    ] {
        for y in rect.y..rect.bottom() {
            for x in rect.x..rect.right() {
                data[y * WIDTH + x] = 120;
            }
        }
    }
    data
}

fn rects(counter: &BlobCounter) -> Vec<Rect> {
    counter.objects_rectangles().unwrap()
}

#[test]
fn min_width_removes_narrow_blobs() {
    let data = scene();
    let view = PixelView::from_slice(&data, WIDTH, HEIGHT, PixelFormat::Gray8).unwrap();
    let mut counter = BlobCounter::new();
    assert_eq!(counter.process_image(view).unwrap(), 3);

    let kept = counter
        .filter_blobs(&BlobFilter {
            min_width: 3,
            ..BlobFilter::default()
        })
        .unwrap();
    assert_eq!(kept, 1);
    assert_eq!(rects(&counter), vec![Rect::new(6, 1, 4, 3)]);
    assert_eq!(counter.objects_information().unwrap()[0].id, 1);

    let map = counter.label_map().unwrap();
    assert_eq!(map.objects_count(), 1);
    assert_eq!(map.get(1, 1), Some(0));
    assert_eq!(map.get(12, 4), Some(0));
    assert_eq!(map.get(6, 1), Some(1));
    assert_eq!(map.labels().iter().filter(|&&l| l == 1).count(), 12);
}

#[test]
fn filtering_is_idempotent() {
    let data = scene();
    let view = PixelView::from_slice(&data, WIDTH, HEIGHT, PixelFormat::Gray8).unwrap();
    let filter = BlobFilter {
        min_height: 3,
        max_width: 3,
        ..BlobFilter::default()
    };
    let mut counter = BlobCounter::new();
    counter.process_image(view).unwrap();

    assert_eq!(counter.filter_blobs(&filter).unwrap(), 1);
    let first = counter.label_map().unwrap().clone();
    assert_eq!(counter.filter_blobs(&filter).unwrap(), 1);
    assert_eq!(counter.label_map().unwrap(), &first);
    assert_eq!(rects(&counter), vec![Rect::new(12, 4, 2, 5)]);
}

#[test]
fn coupled_bounds_require_both_dimensions() {
    let data = scene();
    let view = PixelView::from_slice(&data, WIDTH, HEIGHT, PixelFormat::Gray8).unwrap();
    let bounds = BlobFilter {
        min_width: 3,
        min_height: 3,
        ..BlobFilter::default()
    };

    let mut uncoupled = BlobCounter::new().with_config(BlobCounterConfig {
        size_filter: Some(bounds),
        ..BlobCounterConfig::default()
    });
    assert_eq!(uncoupled.process_image(view).unwrap(), 1);

    // Only the 2x2 block is below both minimums.
    let mut coupled = BlobCounter::new().with_config(BlobCounterConfig {
        size_filter: Some(BlobFilter {
            coupled: true,
            ..bounds
        }),
        ..BlobCounterConfig::default()
    });
    assert_eq!(coupled.process_image(view).unwrap(), 2);
    assert_eq!(
        rects(&coupled),
        vec![Rect::new(6, 1, 4, 3), Rect::new(12, 4, 2, 5)]
    );
    let ids: Vec<u32> = coupled
        .objects_information()
        .unwrap()
        .iter()
        .map(|b| b.id)
        .collect();
    assert_eq!(ids, vec![1, 2]);
}

#[test]
fn predicate_overrides_size_filter() {
    let data = scene();
    let view = PixelView::from_slice(&data, WIDTH, HEIGHT, PixelFormat::Gray8).unwrap();
    let mut counter = BlobCounter::new()
        .with_config(BlobCounterConfig {
            size_filter: Some(BlobFilter {
                min_width: 100,
                ..BlobFilter::default()
            }),
            ..BlobCounterConfig::default()
        })
        .with_predicate(|blob: &Blob| blob.area >= 10);

    assert_eq!(counter.process_image(view).unwrap(), 2);
    assert_eq!(
        rects(&counter),
        vec![Rect::new(6, 1, 4, 3), Rect::new(12, 4, 2, 5)]
    );

    let kept = counter
        .filter_blobs_with(&|blob: &Blob| blob.rect.x > 10)
        .unwrap();
    assert_eq!(kept, 1);
    assert_eq!(counter.label_map().unwrap().get(12, 4), Some(1));
}

#[test]
fn invalid_bounds_and_missing_state_are_errors() {
    let mut counter = BlobCounter::new();
    assert_eq!(
        counter.filter_blobs(&BlobFilter::default()).unwrap_err(),
        BlobMatchError::NotYetProcessed("filter_blobs")
    );

    let data = scene();
    let view = PixelView::from_slice(&data, WIDTH, HEIGHT, PixelFormat::Gray8).unwrap();
    counter.process_image(view).unwrap();
    let err = counter
        .filter_blobs(&BlobFilter {
            min_width: 5,
            max_width: 4,
            ..BlobFilter::default()
        })
        .unwrap_err();
    assert!(matches!(
        err,
        BlobMatchError::ArgumentOutOfRange {
            name: "min_width",
            ..
        }
    ));
    assert_eq!(counter.objects_count().unwrap(), 3);
}

#[test]
fn low_level_filter_keeps_labels_dense() {
    let data = scene();
    let view = PixelView::from_slice(&data, WIDTH, HEIGHT, PixelFormat::Gray8).unwrap();
    let mut labels =
        label_two_pass(view, BackgroundThreshold::uniform(0), ForegroundRule::AnyChannel).unwrap();
    let mut blobs = collect_blobs(&labels, view).unwrap();

    let kept = filter_blobs(&mut labels, &mut blobs, &|blob: &Blob| blob.id != 2).unwrap();
    assert_eq!(kept, 2);
    assert_eq!(blobs.iter().map(|b| b.id).collect::<Vec<_>>(), vec![1, 2]);
    assert_eq!(blobs[1].rect, Rect::new(12, 4, 2, 5));
    assert_eq!(labels.objects_count(), 2);
    assert!(labels.labels().iter().all(|&l| l <= 2));

    let mut stale = blobs.clone();
    stale.pop();
    assert!(matches!(
        filter_blobs(&mut labels, &mut stale, &BlobFilter::default()),
        Err(BlobMatchError::IndexOutOfBounds { .. })
    ));
}

#[test]
fn single_narrow_block_is_filtered_out() {
    let mut data = vec![0u8; 8 * 8];
    for y in 3..5 {
        for x in 3..5 {
            data[y * 8 + x] = 200;
        }
    }
    let view = PixelView::from_slice(&data, 8, 8, PixelFormat::Gray8).unwrap();
    let mut counter = BlobCounter::new().with_config(BlobCounterConfig {
        size_filter: Some(BlobFilter {
            min_width: 3,
            ..BlobFilter::default()
        }),
        ..BlobCounterConfig::default()
    });

    assert_eq!(counter.process_image(view).unwrap(), 0);
    assert!(counter.objects_information().unwrap().is_empty());
    assert!(counter.label_map().unwrap().labels().iter().all(|&l| l == 0));
}

#[test]
fn low_level_filter_rejects_foreign_ids_without_mutating() {
    let data = scene();
    let view = PixelView::from_slice(&data, WIDTH, HEIGHT, PixelFormat::Gray8).unwrap();
    let mut labels =
        label_two_pass(view, BackgroundThreshold::uniform(0), ForegroundRule::AnyChannel).unwrap();
    let blobs = collect_blobs(&labels, view).unwrap();
    let before = labels.clone();

    let mut gapped = blobs.clone();
    gapped[2].id = 7;
    assert_eq!(
        filter_blobs(&mut labels, &mut gapped, &BlobFilter::default()).unwrap_err(),
        BlobMatchError::IndexOutOfBounds {
            index: 7,
            len: 3,
            context: "blob id",
        }
    );

    let mut duplicated = blobs.clone();
    duplicated[2].id = 1;
    assert!(matches!(
        filter_blobs(&mut labels, &mut duplicated, &BlobFilter::default()),
        Err(BlobMatchError::IndexOutOfBounds { index: 1, .. })
    ));

    assert_eq!(labels, before);
    assert_eq!(gapped[2].id, 7);
}
