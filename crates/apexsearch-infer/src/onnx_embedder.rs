//! ONNX-based embedding engine for SentenceTransformers models (all-MiniLM-L6-v2).
//!
//! Loads an ONNX model and HuggingFace tokenizer and produces float32
//! embeddings. Requires the `onnx` feature.

#[cfg(feature = "onnx")]
mod inner {
    use std::path::Path;

    use apexsearch_core::{Error, ModelConfig, Result};
    use ndarray::Array1;
    use ort::session::Session;
    use ort::value::Tensor;
    use parking_lot::Mutex;
    use tokenizers::Tokenizer;
    use tracing::{debug, info};

    use crate::embedder::{EmbedderBackend, Embedding};

    /// Maximum sequence length for the model.
    const MAX_SEQ_LEN: usize = 512;

    /// Embedding dimension of all-MiniLM-L6-v2, used until a probe says otherwise.
    const DEFAULT_DIM: usize = 384;

    /// ONNX embedding engine.
    pub struct OnnxEmbedder {
        // ORT needs exclusive access to run a session.
        session: Mutex<Session>,
        tokenizer: Tokenizer,
        name: String,
        dimension: usize,
    }

    /// Token ids and mask for one input, already truncated.
    struct Encoded {
        ids: Vec<i64>,
        mask: Vec<i64>,
    }

    impl OnnxEmbedder {
        /// Load an ONNX model and tokenizer from `config.dir`.
        ///
        /// Expects:
        /// - `dir/model.onnx` — the ONNX model file
        /// - `dir/tokenizer.json` — the HuggingFace tokenizer
        pub fn load(config: &ModelConfig) -> Result<Self> {
            let model_path = config.dir.join("model.onnx");
            let tokenizer_path = config.dir.join("tokenizer.json");

            if !model_path.exists() {
                return Err(Error::ModelLoad(format!(
                    "Model not found: {}",
                    model_path.display()
                )));
            }
            if !tokenizer_path.exists() {
                return Err(Error::ModelLoad(format!(
                    "Tokenizer not found: {}",
                    tokenizer_path.display()
                )));
            }

            // With load-dynamic, ORT_DYLIB_PATH must point to libonnxruntime.so
            ort::init().commit();

            let session = Self::open_session(&model_path, config.intra_threads)?;
            let tokenizer = Tokenizer::from_file(&tokenizer_path)
                .map_err(|e| Error::ModelLoad(format!("Failed to load tokenizer: {}", e)))?;

            let mut embedder = Self {
                session: Mutex::new(session),
                tokenizer,
                name: config.name.clone(),
                dimension: DEFAULT_DIM,
            };

            // Probe once so the reported dimension matches the weights on disk.
            let probe = embedder
                .infer(&[""])
                .map_err(|e| Error::ModelLoad(format!("Model probe failed: {}", e)))?;
            if let Some(first) = probe.first() {
                embedder.dimension = first.len();
            }

            info!(
                "ONNX embedder loaded: name={}, dim={}, model={}",
                embedder.name,
                embedder.dimension,
                model_path.display()
            );

            Ok(embedder)
        }

        fn open_session(model_path: &Path, intra_threads: usize) -> Result<Session> {
            Session::builder()
                .map_err(|e| Error::ModelLoad(format!("Failed to create session builder: {}", e)))?
                .with_intra_threads(intra_threads)
                .map_err(|e| Error::ModelLoad(format!("Failed to set threads: {}", e)))?
                .commit_from_file(model_path)
                .map_err(|e| Error::ModelLoad(format!("Failed to load ONNX model: {}", e)))
        }

        fn tokenize(&self, text: &str) -> Result<Encoded> {
            let encoding = self
                .tokenizer
                .encode(text, true)
                .map_err(|e| Error::InvalidInput(format!("Tokenization failed: {}", e)))?;

            let seq_len = encoding.get_ids().len().min(MAX_SEQ_LEN);
            Ok(Encoded {
                ids: encoding.get_ids()[..seq_len]
                    .iter()
                    .map(|&id| id as i64)
                    .collect(),
                mask: encoding.get_attention_mask()[..seq_len]
                    .iter()
                    .map(|&m| m as i64)
                    .collect(),
            })
        }

        /// Run inference over a batch, padding every row to the longest input.
        fn infer(&self, texts: &[&str]) -> Result<Vec<Embedding>> {
            if texts.is_empty() {
                return Ok(Vec::new());
            }

            let encoded = texts
                .iter()
                .map(|t| self.tokenize(t))
                .collect::<Result<Vec<_>>>()?;

            let batch = encoded.len();
            let seq_len = encoded.iter().map(|e| e.ids.len()).max().unwrap_or(0);
            if seq_len == 0 {
                return Err(Error::InvalidInput("Tokenizer produced no tokens".into()));
            }

            let mut ids_data = vec![0i64; batch * seq_len];
            let mut mask_data = vec![0i64; batch * seq_len];
            for (row, enc) in encoded.iter().enumerate() {
                let offset = row * seq_len;
                ids_data[offset..offset + enc.ids.len()].copy_from_slice(&enc.ids);
                mask_data[offset..offset + enc.mask.len()].copy_from_slice(&enc.mask);
            }
            let type_ids_data = vec![0i64; batch * seq_len];

            let ids_tensor = Tensor::from_array(([batch, seq_len], ids_data))
                .map_err(|e| Error::Inference(format!("Failed to create ids tensor: {}", e)))?;
            let mask_tensor = Tensor::from_array(([batch, seq_len], mask_data.clone()))
                .map_err(|e| Error::Inference(format!("Failed to create mask tensor: {}", e)))?;
            let type_ids_tensor = Tensor::from_array(([batch, seq_len], type_ids_data))
                .map_err(|e| {
                    Error::Inference(format!("Failed to create type_ids tensor: {}", e))
                })?;

            let mut session = self.session.lock();
            let outputs = session
                .run(ort::inputs![ids_tensor, mask_tensor, type_ids_tensor])
                .map_err(|e| Error::Inference(format!("ONNX inference failed: {}", e)))?;

            let (shape, data) = outputs[0]
                .try_extract_tensor::<f32>()
                .map_err(|e| Error::Inference(format!("Failed to extract output tensor: {}", e)))?;
            let shape_dims: Vec<i64> = shape.iter().copied().collect();
            debug!("ONNX output shape {:?} for batch of {}", shape_dims, batch);

            match shape_dims.as_slice() {
                // Token embeddings [batch, seq_len, dim] → mean pooling with attention mask
                &[b, s, dim] if b as usize == batch && s as usize == seq_len => {
                    Ok(pool_batch(data, &mask_data, batch, seq_len, dim as usize))
                }
                // Already pooled [batch, dim]
                &[b, dim] if b as usize == batch => {
                    let dim = dim as usize;
                    Ok(data
                        .chunks_exact(dim)
                        .take(batch)
                        .map(|row| Array1::from_vec(row.to_vec()))
                        .collect())
                }
                _ => Err(Error::Inference(format!(
                    "Unexpected output shape: {:?}",
                    shape_dims
                ))),
            }
        }
    }

    /// Mean-pool a padded `[batch][seq_len][dim]` output, one embedding per row.
    fn pool_batch(
        data: &[f32],
        mask_data: &[i64],
        batch: usize,
        seq_len: usize,
        dim: usize,
    ) -> Vec<Embedding> {
        (0..batch)
            .map(|row| {
                let mask = &mask_data[row * seq_len..(row + 1) * seq_len];
                let rows = &data[row * seq_len * dim..(row + 1) * seq_len * dim];
                mean_pool(rows, mask, dim)
            })
            .collect()
    }

    /// Average token vectors where the mask is set. `rows` is `[seq_len][dim]`.
    fn mean_pool(rows: &[f32], mask: &[i64], dim: usize) -> Embedding {
        let mut pooled = Array1::zeros(dim);
        let mut count = 0.0f32;
        for (i, &m) in mask.iter().enumerate() {
            if m > 0 {
                let offset = i * dim;
                for d in 0..dim {
                    pooled[d] += rows[offset + d];
                }
                count += 1.0;
            }
        }
        if count > 0.0 {
            pooled / count
        } else {
            pooled
        }
    }

    impl EmbedderBackend for OnnxEmbedder {
        fn embed(&self, text: &str) -> Result<Embedding> {
            self.infer(&[text])?
                .pop()
                .ok_or_else(|| Error::Inference("No embedding returned".into()))
        }

        fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Embedding>> {
            self.infer(texts)
        }

        fn dimension(&self) -> usize {
            self.dimension
        }

        fn model_name(&self) -> &str {
            &self.name
        }
    }

}

#[cfg(feature = "onnx")]
pub use inner::OnnxEmbedder;
