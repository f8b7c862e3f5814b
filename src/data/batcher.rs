// ============================================================
// Layer 4 — Translation Batcher and Data Loader
// ============================================================
// Implements Burn's Batcher trait to turn samples into two Int
// tensors, and wires it into Burn's DataLoader.
//
// Source and target are padded independently, each to the
// longest sequence of its own side IN THIS BATCH:
//
//   src ids            src tensor [2, 3]
//   [1, 2, 3]    ──▶   [1, 2, 3]
//   [1, 2]             [1, 2, 0]     (pad_id = 0)
//
// There is no global max length; a batch of short sentences
// gives a narrow tensor.
//
// The loader:
//   - batch_size from config, last partial batch kept
//   - shuffles in Train mode, reshuffled on every epoch
//   - keeps split order in Eval mode
//   - two worker threads encode and pad ahead of the consumer
//
// Burn hands each worker a contiguous shard of its dataset and
// batches every shard on its own. To keep batch boundaries at
// multiples of batch_size, the loader's items are whole batches:
//
//   samples   0 .. 31 | 32 .. 63 | 64 .. 95 | 96 .. 99
//   chunks    [0]       [1]        [2]        [3]
//   shards    worker A: [0] [1]    worker B: [2] [3]
//
// Workers may deliver chunks in any order; only the last
// chunk can be short.
//
// Reference: Burn Book §4 (Batcher, DataLoader)

use burn::{
    data::{
        dataloader::{batcher::Batcher, DataLoader, DataLoaderBuilder, DataLoaderIterator},
        dataset::Dataset,
    },
    prelude::*,
    tensor::TensorData,
};
use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};
use std::sync::{Arc, Mutex, PoisonError, RwLock};

use crate::data::dataset::EncodedSample;

/// Worker threads used by the loader unless overridden.
pub const DEFAULT_NUM_WORKERS: usize = 2;

// ─── TranslationBatch ─────────────────────────────────────────────────────────
/// Padded source and target ids, `[batch, max_len]` each.
#[derive(Debug, Clone)]
pub struct TranslationBatch<B: Backend> {
    pub src: Tensor<B, 2, Int>,
    pub trg: Tensor<B, 2, Int>,
}

// ─── TranslationBatcher ───────────────────────────────────────────────────────
#[derive(Clone, Debug)]
pub struct TranslationBatcher<B: Backend> {
    device: B::Device,
    pad_id: u32,
}

impl<B: Backend> TranslationBatcher<B> {
    pub fn new(device: B::Device, pad_id: u32) -> Self {
        Self { device, pad_id }
    }

    /// Pad and stack one batch worth of samples.
    pub fn assemble(&self, samples: &[EncodedSample]) -> TranslationBatch<B> {
        TranslationBatch {
            src: self.stack(samples.iter().map(|s| s.src_ids.as_slice())),
            trg: self.stack(samples.iter().map(|s| s.trg_ids.as_slice())),
        }
    }

    fn stack<'a>(&self, seqs: impl Iterator<Item = &'a [u32]>) -> Tensor<B, 2, Int> {
        let (flat, shape) = pad_right(seqs, self.pad_id);
        Tensor::from_data(TensorData::new(flat, shape), &self.device)
    }
}

/// Right-pad every sequence to the longest one with `pad_id`.
///
/// Returns the row-major values and the `[rows, max_len]` shape.
pub fn pad_right<'a>(
    seqs:   impl Iterator<Item = &'a [u32]>,
    pad_id: u32,
) -> (Vec<i64>, [usize; 2]) {
    let seqs: Vec<&[u32]> = seqs.collect();
    let max_len = seqs.iter().map(|s| s.len()).max().unwrap_or(0);

    let mut flat = Vec::with_capacity(seqs.len() * max_len);
    for seq in &seqs {
        flat.extend(seq.iter().map(|&id| i64::from(id)));
        flat.extend(std::iter::repeat(i64::from(pad_id)).take(max_len - seq.len()));
    }

    (flat, [seqs.len(), max_len])
}

// The loader feeds one chunk per batch, so `items` holds a single
// chunk of up to batch_size samples.
impl<B: Backend> Batcher<Vec<EncodedSample>, TranslationBatch<B>> for TranslationBatcher<B> {
    fn batch(&self, items: Vec<Vec<EncodedSample>>) -> TranslationBatch<B> {
        let samples: Vec<EncodedSample> = items.into_iter().flatten().collect();
        self.assemble(&samples)
    }
}

// ─── BatchChunks ──────────────────────────────────────────────────────────────
/// Groups a sample dataset into consecutive runs of `batch_size`
/// samples, read through a permutation of the sample indices.
pub struct BatchChunks {
    samples:    Box<dyn Dataset<EncodedSample>>,
    batch_size: usize,
    order:      RwLock<Vec<usize>>,
}

impl BatchChunks {
    pub fn new(samples: Box<dyn Dataset<EncodedSample>>, batch_size: usize) -> Self {
        let order = (0..samples.len()).collect();
        Self {
            samples,
            batch_size: batch_size.max(1),
            order: RwLock::new(order),
        }
    }

    /// Draw a new sample order; chunk `i` then holds positions
    /// `[i * batch_size, (i + 1) * batch_size)` of that order.
    pub fn reshuffle(&self, rng: &mut StdRng) {
        let mut order = self.order.write().unwrap_or_else(PoisonError::into_inner);
        order.shuffle(rng);
    }
}

impl Dataset<Vec<EncodedSample>> for BatchChunks {
    fn get(&self, index: usize) -> Option<Vec<EncodedSample>> {
        let order = self.order.read().unwrap_or_else(PoisonError::into_inner);
        let start = index.checked_mul(self.batch_size)?;
        if start >= order.len() {
            return None;
        }
        let end = order.len().min(start + self.batch_size);

        order[start..end].iter().map(|&i| self.samples.get(i)).collect()
    }

    fn len(&self) -> usize {
        self.samples.len().div_ceil(self.batch_size)
    }
}

// ─── Loader ───────────────────────────────────────────────────────────────────
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Shuffled every epoch
    Train,
    /// Split order
    Eval,
}

#[derive(Debug, Clone)]
pub struct LoaderConfig {
    pub batch_size:  usize,
    pub mode:        Mode,
    pub pad_id:      u32,
    pub num_workers: usize,
    /// Seeds the per-epoch shuffle in Train mode
    pub seed:        u64,
}

impl LoaderConfig {
    pub fn new(batch_size: usize, mode: Mode, pad_id: u32) -> Self {
        Self {
            batch_size,
            mode,
            pad_id,
            num_workers: DEFAULT_NUM_WORKERS,
            seed:        rand::random(),
        }
    }
}

/// Burn loader over [`BatchChunks`]; a Train mode epoch starts
/// by reshuffling the sample order.
pub struct TranslationLoader<B: Backend> {
    chunks: Arc<BatchChunks>,
    inner:  Arc<dyn DataLoader<TranslationBatch<B>>>,
    mode:   Mode,
    rng:    Mutex<StdRng>,
}

impl<B: Backend> TranslationLoader<B> {
    /// Start an epoch.
    pub fn iter(&self) -> Box<dyn DataLoaderIterator<TranslationBatch<B>> + '_> {
        if self.mode == Mode::Train {
            let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
            self.chunks.reshuffle(&mut rng);
        }
        self.inner.iter()
    }

    pub fn num_batches(&self) -> usize {
        self.chunks.len()
    }
}

/// Build a loader yielding padded batches from `dataset`.
pub fn build_loader<B, D>(
    dataset: D,
    config:  &LoaderConfig,
    device:  B::Device,
) -> TranslationLoader<B>
where
    B: Backend,
    D: Dataset<EncodedSample> + 'static,
{
    let samples = dataset.len();
    let chunks  = Arc::new(BatchChunks::new(Box::new(dataset), config.batch_size));

    let batcher = TranslationBatcher::<B>::new(device, config.pad_id);
    let inner   = DataLoaderBuilder::new(batcher)
        .batch_size(1)
        .num_workers(config.num_workers)
        .build(chunks.clone());

    tracing::debug!(
        "Data loader: {} samples in {} batches, batch_size={}, mode={:?}, workers={}",
        samples,
        chunks.len(),
        config.batch_size,
        config.mode,
        config.num_workers
    );

    TranslationLoader {
        chunks,
        inner,
        mode: config.mode,
        rng: Mutex::new(StdRng::seed_from_u64(config.seed)),
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use burn::backend::NdArray;
    use burn::data::dataset::InMemDataset;

    type TestBackend = NdArray;

    fn sample(src: &[u32], trg: &[u32]) -> EncodedSample {
        EncodedSample {
            src_ids: src.to_vec(),
            trg_ids: trg.to_vec(),
        }
    }

    fn values(t: &Tensor<TestBackend, 2, Int>) -> Vec<i64> {
        t.to_data().iter::<i64>().collect()
    }

    /// Samples whose target id is their position plus 10.
    fn numbered(n: u32) -> Vec<EncodedSample> {
        (0..n)
            .map(|i| sample(&vec![i + 10; (i % 3 + 1) as usize], &[i + 10]))
            .collect()
    }

    fn loader(samples: Vec<EncodedSample>, config: &LoaderConfig) -> TranslationLoader<TestBackend> {
        build_loader::<TestBackend, _>(InMemDataset::new(samples), config, Default::default())
    }

    /// Target ids of every batch in one epoch, batches ordered by first id.
    fn epoch_by_first_id(loader: &TranslationLoader<TestBackend>) -> Vec<Vec<i64>> {
        let mut batches: Vec<Vec<i64>> = loader.iter().map(|b| values(&b.trg)).collect();
        batches.sort_by_key(|b| b[0]);
        batches
    }

    #[test]
    fn test_pad_right_to_longest() {
        let seqs: Vec<Vec<u32>> = vec![vec![1, 2, 3], vec![1, 2]];
        let (flat, shape) = pad_right(seqs.iter().map(|s| s.as_slice()), 0);
        assert_eq!(shape, [2, 3]);
        assert_eq!(flat, vec![1, 2, 3, 1, 2, 0]);
    }

    #[test]
    fn test_pad_right_no_padding_needed() {
        let seqs: Vec<Vec<u32>> = vec![vec![4, 5], vec![6, 7]];
        let (flat, shape) = pad_right(seqs.iter().map(|s| s.as_slice()), 9);
        assert_eq!(shape, [2, 2]);
        assert!(!flat.contains(&9));
    }

    #[test]
    fn test_batch_pads_sides_independently() {
        let batcher = TranslationBatcher::<TestBackend>::new(Default::default(), 0);
        let batch   = batcher.assemble(&[
            sample(&[1, 2, 3], &[7]),
            sample(&[1, 2], &[7, 8, 9, 10]),
        ]);

        assert_eq!(batch.src.dims(), [2, 3]);
        assert_eq!(values(&batch.src), vec![1, 2, 3, 1, 2, 0]);

        assert_eq!(batch.trg.dims(), [2, 4]);
        assert_eq!(values(&batch.trg), vec![7, 0, 0, 0, 7, 8, 9, 10]);
    }

    #[test]
    fn test_batch_uses_configured_pad_id() {
        let batcher = TranslationBatcher::<TestBackend>::new(Default::default(), 3);
        let batch   = batcher.assemble(&[sample(&[5], &[5]), sample(&[5, 6], &[5])]);
        assert_eq!(values(&batch.src), vec![5, 3, 5, 6]);
    }

    #[test]
    fn test_batcher_flattens_a_chunk() {
        let batcher = TranslationBatcher::<TestBackend>::new(Default::default(), 0);
        let batch   = batcher.batch(vec![vec![sample(&[1], &[2]), sample(&[3, 4], &[5])]]);
        assert_eq!(batch.src.dims(), [2, 2]);
        assert_eq!(values(&batch.src), vec![1, 0, 3, 4]);
    }

    #[test]
    fn test_chunks_cover_samples_in_runs() {
        let chunks = BatchChunks::new(Box::new(InMemDataset::new(numbered(7))), 3);
        assert_eq!(chunks.len(), 3);

        let sizes: Vec<usize> = (0..3).map(|i| chunks.get(i).unwrap().len()).collect();
        assert_eq!(sizes, vec![3, 3, 1]);
        assert_eq!(chunks.get(1).unwrap()[0].trg_ids, vec![13]);
        assert!(chunks.get(3).is_none());
    }

    #[test]
    fn test_reshuffle_keeps_every_sample() {
        let chunks = BatchChunks::new(Box::new(InMemDataset::new(numbered(7))), 3);
        chunks.reshuffle(&mut StdRng::seed_from_u64(7));

        let mut seen: Vec<u32> = (0..chunks.len())
            .flat_map(|i| chunks.get(i).unwrap())
            .map(|s| s.trg_ids[0])
            .collect();
        seen.sort();
        assert_eq!(seen, (10..17).collect::<Vec<u32>>());
    }

    #[test]
    fn test_eval_loader_keeps_order_and_last_batch() {
        let mut config = LoaderConfig::new(2, Mode::Eval, 0);
        config.num_workers = 1;
        let loader = loader(numbered(5), &config);

        let batches: Vec<_> = loader.iter().collect();
        let rows: Vec<usize> = batches.iter().map(|b| b.src.dims()[0]).collect();
        assert_eq!(rows, vec![2, 2, 1]);

        let firsts: Vec<i64> = batches.iter().flat_map(|b| values(&b.trg)).collect();
        assert_eq!(firsts, vec![10, 11, 12, 13, 14]);
    }

    #[test]
    fn test_default_workers_keep_batch_size_partition() {
        let config = LoaderConfig::new(32, Mode::Eval, 0);
        assert_eq!(config.num_workers, DEFAULT_NUM_WORKERS);
        let loader = loader(numbered(100), &config);
        assert_eq!(loader.num_batches(), 4);

        let batches = epoch_by_first_id(&loader);
        let rows: Vec<usize> = batches.iter().map(|b| b.len()).collect();
        assert_eq!(rows, vec![32, 32, 32, 4]);

        // Each batch is one contiguous run starting at a multiple of 32
        for (i, batch) in batches.iter().enumerate() {
            let start = 10 + 32 * i as i64;
            let run: Vec<i64> = (start..start + batch.len() as i64).collect();
            assert_eq!(batch, &run);
        }
    }

    #[test]
    fn test_batch_width_is_per_batch_max() {
        let config  = LoaderConfig::new(2, Mode::Eval, 0);
        let samples = vec![
            sample(&[1], &[1]),
            sample(&[1, 2], &[2]),
            sample(&[1, 2, 3, 4, 5], &[3]),
            sample(&[1], &[4]),
        ];
        let loader = loader(samples, &config);

        let mut widths: Vec<(i64, usize)> = loader
            .iter()
            .map(|b| (values(&b.trg)[0], b.src.dims()[1]))
            .collect();
        widths.sort();
        assert_eq!(widths, vec![(1, 2), (3, 5)]);
    }

    #[test]
    fn test_train_loader_covers_every_sample_each_epoch() {
        let config = LoaderConfig::new(3, Mode::Train, 0);
        let loader = loader(numbered(10), &config);

        for _epoch in 0..2 {
            let batches: Vec<Vec<i64>> = loader.iter().map(|b| values(&b.trg)).collect();

            let mut rows: Vec<usize> = batches.iter().map(|b| b.len()).collect();
            rows.sort();
            assert_eq!(rows, vec![1, 3, 3, 3]);

            let mut seen: Vec<i64> = batches.into_iter().flatten().collect();
            seen.sort();
            assert_eq!(seen, (10..20).collect::<Vec<i64>>());
        }
    }

    #[test]
    fn test_train_loader_reshuffles_between_epochs() {
        let mut config = LoaderConfig::new(50, Mode::Train, 0);
        config.seed = 42;
        let loader = loader(numbered(100), &config);

        let first  = epoch_by_first_id(&loader);
        let second = epoch_by_first_id(&loader);
        assert_ne!(first, second);
    }
}
