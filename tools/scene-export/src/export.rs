//! Export orchestration
//!
//! One run: load scene, open the blob, convert and append every mesh in
//! order, extract materials, write the descriptor. Any failure aborts the run;
//! a blob written before the failure is left on disk as-is.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use scene_format::{ExportMesh, Material};

use crate::config::ExportConfig;
use crate::descriptor::write_lua_descriptor;
use crate::error::ExportError;
use crate::import::{FileImporter, SceneImporter};
use crate::layout::BlobWriter;
use crate::material::extract_materials;
use crate::mesh::convert_mesh;
use crate::scene::SourceScene;

/// Progress of an export run
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExportStage {
    NotStarted,
    SceneLoaded,
    MeshesConverted,
    MaterialsExtracted,
    DescriptorWritten,
    Done,
    Failed,
}

/// What a successful run produced
#[derive(Clone, Debug)]
pub struct ExportSummary {
    pub meshes: Vec<ExportMesh>,
    pub materials: Vec<Material>,
    pub blob_path: PathBuf,
    pub blob_len: u64,
    pub descriptor_path: PathBuf,
}

/// Drives one export run
pub struct Exporter<I: SceneImporter = FileImporter> {
    config: ExportConfig,
    importer: I,
    output_dir: PathBuf,
    rng: Pcg32,
    stage: ExportStage,
}

impl Exporter<FileImporter> {
    /// Exporter using the file-extension importer, writing into `output_dir`
    pub fn new(config: ExportConfig, output_dir: impl Into<PathBuf>) -> Self {
        let importer = FileImporter::new(config.import);
        Self::with_importer(config, importer, output_dir)
    }
}

impl<I: SceneImporter> Exporter<I> {
    pub fn with_importer(config: ExportConfig, importer: I, output_dir: impl Into<PathBuf>) -> Self {
        let rng = Pcg32::seed_from_u64(config.seed);
        Self {
            config,
            importer,
            output_dir: output_dir.into(),
            rng,
            stage: ExportStage::NotStarted,
        }
    }

    pub fn stage(&self) -> ExportStage {
        self.stage
    }

    /// Export `input`, moving to [`ExportStage::Failed`] on any error
    pub fn run(&mut self, input: &Path) -> Result<ExportSummary, ExportError> {
        let result = self.run_stages(input);
        if result.is_err() {
            self.stage = ExportStage::Failed;
        }
        result
    }

    fn run_stages(&mut self, input: &Path) -> Result<ExportSummary, ExportError> {
        let scene = self.load_scene(input)?;
        self.stage = ExportStage::SceneLoaded;

        let blob_path = self.output_dir.join(&self.config.blob_file);
        let (meshes, blob_len) = self.write_meshes(&scene, &blob_path)?;
        self.stage = ExportStage::MeshesConverted;

        let materials = extract_materials(&scene);
        self.stage = ExportStage::MaterialsExtracted;

        let descriptor_path = self.output_dir.join(&self.config.descriptor_file);
        self.write_descriptor(&descriptor_path, &meshes, &materials)?;
        self.stage = ExportStage::DescriptorWritten;

        tracing::info!(
            "Exported {} meshes ({} bytes) to {:?}, descriptor {:?}",
            meshes.len(),
            blob_len,
            blob_path,
            descriptor_path
        );
        self.stage = ExportStage::Done;

        Ok(ExportSummary {
            meshes,
            materials,
            blob_path,
            blob_len,
            descriptor_path,
        })
    }

    fn load_scene(&self, input: &Path) -> Result<SourceScene, ExportError> {
        let scene = self
            .importer
            .import(input)
            .map_err(|source| ExportError::Import {
                path: input.to_path_buf(),
                source,
            })?;

        if scene.meshes.is_empty() {
            return Err(ExportError::EmptyScene {
                path: input.to_path_buf(),
            });
        }

        tracing::info!(
            "Loaded scene from {:?}: {} meshes, {} materials",
            input,
            scene.meshes.len(),
            scene.materials.len()
        );
        Ok(scene)
    }

    /// Convert every mesh in order and append it to the blob
    fn write_meshes(
        &mut self,
        scene: &SourceScene,
        blob_path: &Path,
    ) -> Result<(Vec<ExportMesh>, u64), ExportError> {
        let file = File::create(blob_path).map_err(|source| ExportError::CreateOutput {
            path: blob_path.to_path_buf(),
            source,
        })?;
        let write_err = |source| ExportError::WriteBlob {
            path: blob_path.to_path_buf(),
            source,
        };

        let mut blob = BlobWriter::new(BufWriter::new(file));
        let mut records = Vec::with_capacity(scene.meshes.len());

        for (i, mesh) in scene.meshes.iter().enumerate() {
            let converted = convert_mesh(mesh, self.config.centering, &mut self.rng);
            let record = blob
                .append(&converted, mesh.material_index)
                .map_err(write_err)?;
            tracing::debug!(
                "Mesh {} ({:?}): {} vertices, {} indices, radius {}",
                i,
                mesh.name,
                record.num_vertices,
                record.num_indices,
                record.radius
            );
            tracing::info!("mesh {} done", i);
            records.push(record);
        }

        let blob_len = blob.offset();
        blob.finish().map_err(write_err)?;
        Ok((records, blob_len))
    }

    fn write_descriptor(
        &self,
        path: &Path,
        meshes: &[ExportMesh],
        materials: &[Material],
    ) -> Result<(), ExportError> {
        let io_err = |source| ExportError::WriteDescriptor {
            path: path.to_path_buf(),
            source,
        };

        let file = File::create(path).map_err(io_err)?;
        let mut writer = BufWriter::new(file);
        write_lua_descriptor(&mut writer, &self.config.blob_file, meshes, materials)
            .map_err(io_err)?;
        std::io::Write::flush(&mut writer).map_err(io_err)
    }
}

/// Export `input` into `output_dir` with `config`
pub fn export_scene(
    input: &Path,
    output_dir: &Path,
    config: ExportConfig,
) -> Result<ExportSummary, ExportError> {
    Exporter::new(config, output_dir).run(input)
}
