use std::path::Path;

use super::*;
use crate::render::backend::RecordingRenderer;

const RIGID: &str = "x,y,z\n0,0,0\n-1,0.5,-1\n1,0.5,1\n";
const FLUID: &str = "x,y,z\n0,0.2,0\n0,2.0,0\n";

fn fixture(name: &str, frames: &[u64], skip_fluid: &[u64]) -> RunConfig {
    let root = PathBuf::from("target").join("unit_pipeline").join(name);
    let _ = std::fs::remove_dir_all(&root);
    let particles = root.join("particles");
    std::fs::create_dir_all(&particles).unwrap();
    for &k in frames {
        std::fs::write(particles.join(format!("BCE_Rigid{k}.csv")), RIGID).unwrap();
        if !skip_fluid.contains(&k) {
            std::fs::write(particles.join(format!("fluid{k}.csv")), FLUID).unwrap();
        }
    }
    let mut cfg = RunConfig {
        sim_root: root,
        ..RunConfig::default()
    };
    cfg.set_frames(0, frames.len() as u64).unwrap();
    cfg
}

struct FailOn(u64, RecordingRenderer);

impl Renderer for FailOn {
    fn render_frame(&mut self, scene: &FrameScene, out_path: &Path) -> DrumviewResult<()> {
        if scene.frame.0 == self.0 {
            return Err(DrumviewError::asset("disk full"));
        }
        self.1.render_frame(scene, out_path)
    }
}

#[test]
fn failing_frames_are_logged_and_skipped() {
    let cfg = fixture("skip", &[0, 1, 2], &[1]);
    let mut rec = RecordingRenderer::new();
    let stats = render_range(&cfg, &mut rec).unwrap();

    assert_eq!(stats.frames_total, 3);
    assert_eq!(stats.frames_rendered, 2);
    assert_eq!(stats.frames_failed, 1);
    assert_eq!(stats.failed[0].frame, FrameIndex(1));
    assert_eq!(stats.failed[0].kind, "data_format");

    let frames: Vec<u64> = rec.frames().iter().map(|(f, _, _)| f.0).collect();
    assert_eq!(frames, vec![0, 2]);
    assert!(rec.ended());
    assert!(cfg.layout().out_dir().is_dir());
    assert_eq!(rec.target().unwrap().view, "side_view");
}

#[test]
fn output_paths_follow_view_file_name() {
    let mut cfg = fixture("paths", &[0, 1], &[]);
    cfg.view = "focused_view".to_owned();
    let mut rec = RecordingRenderer::new();
    render_range(&cfg, &mut rec).unwrap();
    assert_eq!(
        rec.frames()[1].1,
        cfg.layout().out_dir().join("focused_view_0001.png")
    );
}

#[test]
fn parallel_matches_sequential() {
    let frames: Vec<u64> = (0..7).collect();
    let mut cfg = fixture("parallel", &frames, &[3, 5]);

    let mut seq = RecordingRenderer::new();
    let seq_stats = render_range(&cfg, &mut seq).unwrap();

    cfg.threading = RenderThreading {
        parallel: true,
        chunk_size: 3,
        threads: Some(2),
    };
    let mut par = RecordingRenderer::new();
    let par_stats = render_range(&cfg, &mut par).unwrap();

    assert_eq!(seq_stats, par_stats);
    assert_eq!(seq.frames(), par.frames());
    let order: Vec<u64> = par.frames().iter().map(|(f, _, _)| f.0).collect();
    assert_eq!(order, vec![0, 1, 2, 4, 6]);
}

#[test]
fn renderer_errors_only_fail_their_frame() {
    let cfg = fixture("render_err", &[0, 1, 2], &[]);
    let mut r = FailOn(2, RecordingRenderer::new());
    let stats = render_range(&cfg, &mut r).unwrap();
    assert_eq!(stats.frames_rendered, 2);
    assert_eq!(stats.failed.len(), 1);
    assert_eq!(stats.failed[0].kind, "asset");
    assert!(stats.failed[0].message.contains("disk full"));
}

#[test]
fn invalid_config_is_a_setup_error() {
    let mut cfg = fixture("bad_cfg", &[0], &[]);
    cfg.view = "missing".to_owned();
    let mut rec = RecordingRenderer::new();
    assert!(render_range(&cfg, &mut rec).is_err());
    assert!(rec.target().is_none());
}

#[test]
fn empty_range_renders_nothing() {
    let mut cfg = fixture("empty", &[0], &[]);
    cfg.set_frames(0, 0).unwrap();
    let mut rec = RecordingRenderer::new();
    let stats = render_range(&cfg, &mut rec).unwrap();
    assert_eq!(stats, RunStats::default());
    assert!(rec.ended());
}

#[test]
fn render_one_propagates_errors() {
    let cfg = fixture("one", &[0, 1], &[1]);
    let mut rec = RecordingRenderer::new();
    let path = render_one(&cfg, FrameIndex(0), None, &mut rec).unwrap();
    assert_eq!(path, cfg.layout().out_dir().join("side_view_0000.png"));
    assert!(matches!(
        render_one(&cfg, FrameIndex(1), None, &mut rec),
        Err(DrumviewError::DataFormat(_))
    ));
}

#[test]
fn chunk_size_zero_is_normalized() {
    assert_eq!(normalized_chunk_size(0), 1);
    assert_eq!(normalized_chunk_size(8), 8);
    assert!(build_thread_pool(Some(2)).is_ok());
}

#[test]
fn zero_threads_is_rejected_before_rendering() {
    let mut cfg = fixture("zero_threads", &[0], &[]);
    cfg.threading.parallel = true;
    cfg.threading.threads = Some(0);
    let mut rec = RecordingRenderer::new();
    assert!(matches!(
        render_range(&cfg, &mut rec),
        Err(DrumviewError::Validation(_))
    ));
    assert!(rec.target().is_none());
}

#[test]
fn render_one_writes_to_explicit_path() {
    let cfg = fixture("one_out", &[0], &[]);
    let out = PathBuf::from("target")
        .join("unit_pipeline")
        .join("one_out_custom")
        .join("still.png");
    let _ = std::fs::remove_dir_all(out.parent().unwrap());
    let mut rec = RecordingRenderer::new();
    let path = render_one(&cfg, FrameIndex(0), Some(&out), &mut rec).unwrap();
    assert_eq!(path, out);
    assert_eq!(rec.frames()[0].1, out);
    assert!(out.parent().unwrap().is_dir());
}

#[test]
fn render_one_rejects_last_frame_index() {
    let cfg = fixture("one_max", &[0], &[]);
    let mut rec = RecordingRenderer::new();
    assert!(matches!(
        render_one(&cfg, FrameIndex(u64::MAX), None, &mut rec),
        Err(DrumviewError::Validation(_))
    ));
    assert!(rec.target().is_none());
}
