use super::*;

#[test]
fn frame_range_contains_boundaries() {
    let r = FrameRange::new(FrameIndex(2), FrameIndex(5)).unwrap();
    assert!(!r.contains(FrameIndex(1)));
    assert!(r.contains(FrameIndex(2)));
    assert!(r.contains(FrameIndex(4)));
    assert!(!r.contains(FrameIndex(5)));
    assert_eq!(r.len_frames(), 3);
}

#[test]
fn frame_range_rejects_reversed_bounds() {
    assert!(FrameRange::new(FrameIndex(5), FrameIndex(2)).is_err());
    assert!(
        FrameRange::new(FrameIndex(3), FrameIndex(3))
            .unwrap()
            .is_empty()
    );
}

#[test]
fn frame_range_iterates_in_order() {
    let r = FrameRange::new(FrameIndex(7), FrameIndex(10)).unwrap();
    let frames: Vec<u64> = r.iter().map(|f| f.0).collect();
    assert_eq!(frames, vec![7, 8, 9]);
}

#[test]
fn frame_index_padding() {
    assert_eq!(FrameIndex(7).padded(), "0007");
    assert_eq!(FrameIndex(12345).padded(), "12345");
}
