use blobmatch::{BlobMatchError, PixelBuffer, PixelFormat, PixelView, PixelViewMut, Rect};

#[test]
fn pixel_view_rejects_invalid_dimensions() {
    let data = [0u8; 4];

    let err = PixelView::from_slice(&data, 0, 1, PixelFormat::Gray8)
        .err()
        .unwrap();
    assert_eq!(
        err,
        BlobMatchError::InvalidDimensions {
            width: 0,
            height: 1,
        }
    );

    let err = PixelView::from_slice(&data, 1, 0, PixelFormat::Gray8)
        .err()
        .unwrap();
    assert_eq!(
        err,
        BlobMatchError::InvalidDimensions {
            width: 1,
            height: 0,
        }
    );
}

#[test]
fn pixel_view_rejects_stride_shorter_than_row() {
    let data = [0u8; 32];

    let err = PixelView::new(&data, 4, 2, 11, PixelFormat::Rgb24)
        .err()
        .unwrap();
    assert_eq!(
        err,
        BlobMatchError::InvalidStride {
            row_bytes: 12,
            stride: 11,
        }
    );
}

#[test]
fn pixel_view_rejects_small_buffer() {
    let data = [0u8; 5];

    // Two rows of stride 4; the last row needs only its two pixel bytes.
    let err = PixelView::new(&data, 2, 2, 4, PixelFormat::Gray8)
        .err()
        .unwrap();
    assert_eq!(err, BlobMatchError::BufferTooSmall { needed: 6, got: 5 });

    let data = [0u8; 6];
    assert!(PixelView::new(&data, 2, 2, 4, PixelFormat::Gray8).is_ok());
}

#[test]
fn padded_rows_are_skipped() {
    // 2x2 RGB with one byte of padding per row.
    #[rustfmt::skip]
    let data = [
        1u8, 2, 3, 4, 5, 6, 99,
        7, 8, 9, 10, 11, 12, 99,
    ];
    let view = PixelView::new(&data, 2, 2, 7, PixelFormat::Rgb24).unwrap();
    assert_eq!(view.row(1).unwrap(), &[7, 8, 9, 10, 11, 12]);
    assert_eq!(view.pixel(1, 0).unwrap(), &[4, 5, 6]);
    assert!(view.pixel(2, 0).is_none());

    let owned = PixelBuffer::from_view(view);
    assert_eq!(owned.stride(), 6);
    assert_eq!(owned.data(), &[1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12]);
}

#[test]
fn roi_shares_parent_stride() {
    let data: Vec<u8> = (0u8..16).collect();
    let view = PixelView::from_slice(&data, 4, 4, PixelFormat::Gray8).unwrap();

    let roi = view.roi(Rect::new(1, 1, 2, 2)).unwrap();
    assert_eq!(roi.width(), 2);
    assert_eq!(roi.height(), 2);
    assert_eq!(roi.stride(), 4);
    assert_eq!(roi.row(0).unwrap(), &[5u8, 6u8]);
    assert_eq!(roi.row(1).unwrap(), &[9u8, 10u8]);

    let err = view.roi(Rect::new(3, 3, 2, 2)).err().unwrap();
    assert_eq!(
        err,
        BlobMatchError::RoiOutOfBounds {
            x: 3,
            y: 3,
            width: 2,
            height: 2,
            img_width: 4,
            img_height: 4,
        }
    );
}

#[test]
fn mutable_view_edits_in_place() {
    let mut buffer = PixelBuffer::zeroed(3, 2, PixelFormat::Rgba32).unwrap();
    {
        let mut view = buffer.view_mut();
        view.pixel_mut(2, 1).unwrap().copy_from_slice(&[1, 2, 3, 4]);
    }
    assert_eq!(buffer.view().pixel(2, 1).unwrap(), &[1, 2, 3, 4]);
    assert_eq!(buffer.data().iter().filter(|&&b| b != 0).count(), 4);

    let mut raw = vec![0u8; 4];
    let mut view = PixelViewMut::from_slice(&mut raw, 2, 2, PixelFormat::Gray8).unwrap();
    view.row_mut(1).unwrap().copy_from_slice(&[7, 8]);
    assert_eq!(view.as_view().pixel(1, 1).unwrap(), &[8]);
}
