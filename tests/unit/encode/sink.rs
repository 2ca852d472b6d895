use super::*;

fn cfg() -> SinkConfig {
    SinkConfig {
        width: 2,
        height: 1,
        fps: Fps::new(15, 1).unwrap(),
    }
}

fn frame(fill: [u8; 4]) -> FrameRGBA {
    FrameRGBA {
        width: 2,
        height: 1,
        data: [fill, fill].concat(),
        premultiplied: true,
    }
}

fn temp_dir(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("bellcurve_{name}_{}", std::process::id()))
}

#[test]
fn in_memory_keeps_frames_in_order() {
    let mut sink = InMemorySink::new();
    sink.begin(cfg()).unwrap();
    sink.push_frame(FrameIndex(0), &frame([1, 2, 3, 255])).unwrap();
    sink.push_frame(FrameIndex(1), &frame([4, 5, 6, 255])).unwrap();
    sink.end().unwrap();
    assert!(sink.is_ended());
    assert_eq!(sink.config(), Some(cfg()));
    let idx: Vec<u64> = sink.frames().iter().map(|(i, _)| i.0).collect();
    assert_eq!(idx, vec![0, 1]);
}

#[test]
fn in_memory_rejects_out_of_order_frames() {
    let mut sink = InMemorySink::new();
    sink.begin(cfg()).unwrap();
    sink.push_frame(FrameIndex(3), &frame([0; 4])).unwrap();
    let err = sink.push_frame(FrameIndex(3), &frame([0; 4])).unwrap_err();
    assert!(err.to_string().contains("out-of-order"));
}

#[test]
fn default_sinks_want_every_frame() {
    let sink = InMemorySink::new();
    assert!(sink.wants_frame(FrameIndex(0)));
    assert!(sink.wants_frame(FrameIndex(10_000)));
    assert!(!CountingSink::default().wants_frame(FrameIndex(0)));
}

#[test]
fn single_frame_sink_wants_only_its_target() {
    let sink = SingleFrameSink::new(FrameIndex(7), temp_dir("unused").join("x.png"));
    assert!(sink.wants_frame(FrameIndex(7)));
    assert!(!sink.wants_frame(FrameIndex(6)));
    assert!(!sink.wants_frame(FrameIndex(8)));
}

#[test]
fn single_frame_sink_errors_when_target_never_arrives() {
    let mut sink = SingleFrameSink::new(FrameIndex(99), temp_dir("never").join("x.png"));
    sink.begin(cfg()).unwrap();
    let err = sink.end().unwrap_err();
    assert!(err.to_string().contains("past the end"));
}

#[test]
fn single_frame_sink_writes_png() {
    let dir = temp_dir("single");
    let out = dir.join("last.png");
    let mut sink = SingleFrameSink::new(FrameIndex(0), &out);
    sink.begin(cfg()).unwrap();
    sink.push_frame(FrameIndex(0), &frame([10, 20, 30, 255])).unwrap();
    sink.end().unwrap();

    let img = image::open(&out).unwrap().to_rgba8();
    assert_eq!(img.dimensions(), (2, 1));
    assert_eq!(img.get_pixel(1, 0).0, [10, 20, 30, 255]);
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn png_sequence_names_frames_by_index() {
    let dir = temp_dir("seq");
    let mut sink = PngSequenceSink::new(&dir);
    sink.begin(cfg()).unwrap();
    sink.push_frame(FrameIndex(0), &frame([0, 0, 0, 255])).unwrap();
    sink.push_frame(FrameIndex(12), &frame([255, 255, 255, 255]))
        .unwrap();
    sink.end().unwrap();

    assert_eq!(sink.written(), 2);
    assert!(dir.join("frame_00000.png").is_file());
    assert!(dir.join("frame_00012.png").is_file());
    assert_eq!(
        sink.path_for(FrameIndex(3)).file_name().unwrap(),
        "frame_00003.png"
    );
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn png_output_is_unpremultiplied() {
    assert_eq!(unpremultiply(&[64, 32, 0, 128]), vec![128, 64, 0, 128]);
    assert_eq!(unpremultiply(&[0, 0, 0, 0]), vec![0, 0, 0, 0]);
    assert_eq!(unpremultiply(&[9, 8, 7, 255]), vec![9, 8, 7, 255]);
}

#[test]
fn single_frame_sink_keeps_existing_file_without_overwrite() {
    let dir = temp_dir("single_keep");
    std::fs::create_dir_all(&dir).unwrap();
    let out = dir.join("existing.png");
    std::fs::write(&out, b"precious").unwrap();

    let mut sink = SingleFrameSink::new(FrameIndex(0), &out).with_overwrite(false);
    let err = sink.begin(cfg()).unwrap_err();
    assert!(err.to_string().contains("already exists"));
    assert_eq!(std::fs::read(&out).unwrap(), b"precious");

    let mut sink = SingleFrameSink::new(FrameIndex(0), &out);
    sink.begin(cfg()).unwrap();
    sink.push_frame(FrameIndex(0), &frame([1, 2, 3, 255])).unwrap();
    sink.end().unwrap();
    assert_ne!(std::fs::read(&out).unwrap(), b"precious");
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn png_sequence_keeps_existing_frames_without_overwrite() {
    let dir = temp_dir("seq_keep");
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join("frame_00001.png"), b"precious").unwrap();

    let mut sink = PngSequenceSink::new(&dir).with_overwrite(false);
    sink.begin(cfg()).unwrap();
    sink.push_frame(FrameIndex(0), &frame([0, 0, 0, 255])).unwrap();
    let err = sink.push_frame(FrameIndex(1), &frame([0, 0, 0, 255])).unwrap_err();
    assert!(err.to_string().contains("already exists"));
    assert_eq!(std::fs::read(dir.join("frame_00001.png")).unwrap(), b"precious");
    assert_eq!(sink.written(), 1);
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn prepare_output_creates_parent_directories() {
    let dir = temp_dir("prepare");
    let out = dir.join("nested").join("x.png");
    prepare_output(&out, false).unwrap();
    assert!(dir.join("nested").is_dir());
    let _ = std::fs::remove_dir_all(&dir);
}
