//! Renderer seam: format writers consume the primitive list, nothing else.

use std::path::Path;

use crate::error::FlattenError;
use crate::export::FaceDrawing;
use crate::types::Primitive;

/// A drawing-format renderer over the primitive-list IR.
///
/// Each output format implements this independently; the flattening core
/// never knows about format bytes.
pub trait DrawingRenderer {
    /// File extension without the dot (e.g. `dxf`).
    fn extension(&self) -> &'static str;

    /// Render a primitive list to the format's textual form.
    fn render(&self, primitives: &[Primitive]) -> String;
}

/// Render a face drawing and write it to `path`.
///
/// On write failure nothing is retained at `path`; cleanup failure of a
/// partial file is logged only.
pub fn write_drawing(
    drawing: &FaceDrawing,
    renderer: &dyn DrawingRenderer,
    path: &Path,
) -> Result<(), FlattenError> {
    let content = renderer.render(&drawing.primitives);
    if let Err(err) = std::fs::write(path, content) {
        if path.exists() {
            if let Err(cleanup_err) = std::fs::remove_file(path) {
                log::warn!("could not remove partial artifact {}: {cleanup_err}", path.display());
            }
        }
        return Err(FlattenError::ExportWrite(err));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::placeholder_primitives;
    use crate::export::PipelineSource;

    struct CountingRenderer;

    impl DrawingRenderer for CountingRenderer {
        fn extension(&self) -> &'static str {
            "txt"
        }

        fn render(&self, primitives: &[Primitive]) -> String {
            format!("{} primitives", primitives.len())
        }
    }

    #[test]
    fn test_write_drawing_round_trip() {
        let drawing = FaceDrawing {
            primitives: placeholder_primitives(),
            wire_count: 1,
            source: PipelineSource::Placeholder,
        };
        let path = std::env::temp_dir().join("faceplate_render_test.txt");
        write_drawing(&drawing, &CountingRenderer, &path).expect("write");
        let content = std::fs::read_to_string(&path).expect("read back");
        assert_eq!(content, "1 primitives");
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_write_drawing_into_missing_dir_fails_typed() {
        let drawing = FaceDrawing {
            primitives: placeholder_primitives(),
            wire_count: 1,
            source: PipelineSource::Placeholder,
        };
        let path = Path::new("/nonexistent-dir-for-sure/out.txt");
        let err = write_drawing(&drawing, &CountingRenderer, path);
        assert!(matches!(err, Err(FlattenError::ExportWrite(_))));
    }
}
