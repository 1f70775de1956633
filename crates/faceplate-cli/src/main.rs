//! faceplate CLI - flatten B-rep faces into manufacturing drawings.
//!
//! Reads a face-set JSON file (the output of an exchange-file reader)
//! and exports individual faces as DXF or SVG, or prints preview JSON.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};

use faceplate_brep::FaceData;
use faceplate_dxf::DxfRenderer;
use faceplate_flatten::{
    build_preview, flatten_face, write_drawing, DrawingRenderer, HoleDetectionParams,
};
use faceplate_svg::SvgRenderer;

#[derive(Parser)]
#[command(name = "faceplate")]
#[command(about = "Flatten exchange-file faces into 2D drawings", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    /// AutoCAD drawing exchange format.
    Dxf,
    /// Scalable vector graphics.
    Svg,
}

#[derive(Subcommand)]
enum Commands {
    /// Display information about a face-set file
    Info {
        /// Path to the face-set JSON file
        input: PathBuf,
    },
    /// Export one face to a drawing file
    Export {
        /// Path to the face-set JSON file
        input: PathBuf,
        /// Zero-based face index
        #[arg(short, long)]
        face: usize,
        /// Output drawing format
        #[arg(short = 'F', long, value_enum, default_value = "dxf")]
        format: Format,
        /// Output file (default: derived from the input name)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Print the preview payload for one face as JSON
    Preview {
        /// Path to the face-set JSON file
        input: PathBuf,
        /// Zero-based face index
        #[arg(short, long)]
        face: usize,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Info { input } => show_info(&input),
        Commands::Export {
            input,
            face,
            format,
            output,
        } => export_face(&input, face, format, output),
        Commands::Preview { input, face } => print_preview(&input, face),
    }
}

fn load_faces(input: &Path) -> Result<Vec<FaceData>> {
    let json = std::fs::read_to_string(input)
        .with_context(|| format!("reading face set {}", input.display()))?;
    let faces: Vec<FaceData> =
        serde_json::from_str(&json).with_context(|| format!("parsing {}", input.display()))?;
    Ok(faces)
}

fn select_face(faces: &[FaceData], index: usize) -> Result<&FaceData> {
    faces.get(index).with_context(|| {
        format!(
            "face index {index} out of range ({} faces available)",
            faces.len()
        )
    })
}

fn show_info(input: &Path) -> Result<()> {
    let faces = load_faces(input)?;
    println!("{}: {} faces", input.display(), faces.len());
    for face in &faces {
        let mesh_info = match &face.mesh {
            Some(mesh) => format!(
                "{} vertices, {} triangles",
                mesh.num_vertices(),
                mesh.num_triangles()
            ),
            None => "no mesh".to_string(),
        };
        println!(
            "  face {}: {} surface, {} wires, {mesh_info}",
            face.id,
            face.surface_class,
            face.wires.len()
        );
    }
    Ok(())
}

fn export_face(input: &Path, face_index: usize, format: Format, output: Option<PathBuf>) -> Result<()> {
    let faces = load_faces(input)?;
    let face = select_face(&faces, face_index)?;

    let renderer: &dyn DrawingRenderer = match format {
        Format::Dxf => &DxfRenderer,
        Format::Svg => &SvgRenderer,
    };

    let output = match output {
        Some(path) => path,
        None => {
            let stem = input
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("export");
            PathBuf::from(format!(
                "{stem}_face_{}.{}",
                face_index + 1,
                renderer.extension()
            ))
        }
    };

    let drawing = flatten_face(face);
    if drawing.entity_count() == 0 {
        bail!("face {face_index} produced no drawing entities");
    }
    write_drawing(&drawing, renderer, &output)
        .with_context(|| format!("writing {}", output.display()))?;

    println!(
        "Exported face {} ({} wires, {} entities, {:?}) -> {}",
        face_index,
        drawing.wire_count,
        drawing.entity_count(),
        drawing.source,
        output.display()
    );
    Ok(())
}

fn print_preview(input: &Path, face_index: usize) -> Result<()> {
    let faces = load_faces(input)?;
    let face = select_face(&faces, face_index)?;
    let payload = build_preview(face, &HoleDetectionParams::default());
    println!("{}", serde_json::to_string_pretty(&payload)?);
    Ok(())
}
