//! World overlay and chunk streaming
//!
//! The overlay records every cell whose block diverged from the generator
//! (eaten, broken, spawned, summoned). Chunks are the unit of load and
//! eviction: evicting a chunk purges its overlay cells, which re-exposes the
//! generated terrain the next time the area is visited.

use std::collections::HashMap;

use glam::IVec2;
use serde::{Deserialize, Serialize};

use super::terrain::{BlockType, generate_base};
use crate::consts::{CHUNK_LOAD_RADIUS, CHUNK_SIZE, CHUNK_TIMEOUT_MS, MAX_LOADED_CHUNKS};

/// Grid-keyed maps as sorted `[cell, value]` pairs, since JSON object keys
/// must be strings
mod cell_pairs {
    use std::collections::HashMap;

    use glam::IVec2;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<V, S>(map: &HashMap<IVec2, V>, serializer: S) -> Result<S::Ok, S::Error>
    where
        V: Serialize,
        S: Serializer,
    {
        let mut pairs: Vec<(IVec2, &V)> = map.iter().map(|(k, v)| (*k, v)).collect();
        pairs.sort_by_key(|(k, _)| (k.y, k.x));
        pairs.serialize(serializer)
    }

    pub fn deserialize<'de, V, D>(deserializer: D) -> Result<HashMap<IVec2, V>, D::Error>
    where
        V: Deserialize<'de>,
        D: Deserializer<'de>,
    {
        let pairs = Vec::<(IVec2, V)>::deserialize(deserializer)?;
        Ok(pairs.into_iter().collect())
    }
}

/// Chunk containing `cell`
#[inline]
pub fn chunk_of(cell: IVec2) -> IVec2 {
    IVec2::new(cell.x.div_euclid(CHUNK_SIZE), cell.y.div_euclid(CHUNK_SIZE))
}

/// World-space origin (min corner) of a chunk
#[inline]
pub fn chunk_origin(chunk: IVec2) -> IVec2 {
    chunk * CHUNK_SIZE
}

/// Sparse cell -> block overrides on top of the generator
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WorldMap {
    #[serde(with = "cell_pairs")]
    cells: HashMap<IVec2, BlockType>,
}

impl WorldMap {
    pub fn get(&self, cell: IVec2) -> Option<BlockType> {
        self.cells.get(&cell).copied()
    }

    pub fn contains(&self, cell: IVec2) -> bool {
        self.cells.contains_key(&cell)
    }

    /// Override a cell permanently (until its chunk is evicted)
    pub fn set(&mut self, cell: IVec2, block: BlockType) {
        self.cells.insert(cell, block);
    }

    /// Drop an override, re-exposing the generator
    pub fn remove(&mut self, cell: IVec2) -> Option<BlockType> {
        self.cells.remove(&cell)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (IVec2, BlockType)> + '_ {
        self.cells.iter().map(|(&cell, &block)| (cell, block))
    }

    /// Remove every override inside `chunk`; returns how many were removed
    pub fn purge_chunk(&mut self, chunk: IVec2) -> usize {
        let before = self.cells.len();
        self.cells.retain(|&cell, _| chunk_of(cell) != chunk);
        before - self.cells.len()
    }

    /// Spawned pickups currently in the overlay
    pub fn count_items(&self) -> u32 {
        self.cells.values().filter(|b| b.is_item()).count() as u32
    }
}

/// Pre-generated base terrain for one chunk (row-major, local coordinates)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedCells {
    pub level: u32,
    pub cells: Vec<BlockType>,
}

impl GeneratedCells {
    fn build(chunk: IVec2, level: u32, tutorial: bool) -> Self {
        let origin = chunk_origin(chunk);
        let mut cells = Vec::with_capacity((CHUNK_SIZE * CHUNK_SIZE) as usize);
        for ly in 0..CHUNK_SIZE {
            for lx in 0..CHUNK_SIZE {
                cells.push(generate_base(origin + IVec2::new(lx, ly), level, tutorial));
            }
        }
        Self { level, cells }
    }

    fn get(&self, local: IVec2) -> BlockType {
        self.cells[(local.y * CHUNK_SIZE + local.x) as usize]
    }
}

/// A loaded square region of the grid
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chunk {
    pub coord: IVec2,
    pub last_visited_ms: u64,
    /// Only present when the manager pre-generates for snapshots
    pub generated: Option<GeneratedCells>,
}

/// Tracks loaded chunks around the head and evicts stale ones
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChunkManager {
    #[serde(with = "cell_pairs")]
    chunks: HashMap<IVec2, Chunk>,
    /// Generate every cell on load instead of answering lazily
    pregenerate: bool,
    /// Soft cap on loaded chunks
    max_chunks: usize,
}

impl Default for ChunkManager {
    fn default() -> Self {
        Self::new(false)
    }
}

impl ChunkManager {
    pub fn new(pregenerate: bool) -> Self {
        Self {
            chunks: HashMap::new(),
            pregenerate,
            max_chunks: MAX_LOADED_CHUNKS,
        }
    }

    pub fn with_max_chunks(mut self, max_chunks: usize) -> Self {
        self.max_chunks = max_chunks.max(1);
        self
    }

    pub fn pregenerates(&self) -> bool {
        self.pregenerate
    }

    /// Load every chunk within the load radius of `head` and stamp it visited.
    /// Returns the number of newly loaded chunks.
    pub fn update(&mut self, head: IVec2, now_ms: u64, level: u32, tutorial: bool) -> usize {
        let center = chunk_of(head);
        let mut loaded = 0;
        for dy in -CHUNK_LOAD_RADIUS..=CHUNK_LOAD_RADIUS {
            for dx in -CHUNK_LOAD_RADIUS..=CHUNK_LOAD_RADIUS {
                let coord = center + IVec2::new(dx, dy);
                let pregenerate = self.pregenerate;
                let chunk = self.chunks.entry(coord).or_insert_with(|| {
                    loaded += 1;
                    Chunk {
                        coord,
                        last_visited_ms: now_ms,
                        generated: None,
                    }
                });
                chunk.last_visited_ms = now_ms;
                if pregenerate {
                    let stale = chunk.generated.as_ref().is_none_or(|g| g.level != level);
                    if stale {
                        chunk.generated = Some(GeneratedCells::build(coord, level, tutorial));
                    }
                }
            }
        }
        loaded
    }

    /// Evict chunks unvisited for longer than the timeout, then enforce the
    /// soft cap oldest-first. The chunk holding `head` is never evicted.
    /// Overlay cells of evicted chunks are purged.
    pub fn sweep(&mut self, head: IVec2, now_ms: u64, overlay: &mut WorldMap) -> Vec<IVec2> {
        let head_chunk = chunk_of(head);
        let mut evicted: Vec<IVec2> = self
            .chunks
            .values()
            .filter(|c| c.coord != head_chunk)
            .filter(|c| now_ms.saturating_sub(c.last_visited_ms) > CHUNK_TIMEOUT_MS)
            .map(|c| c.coord)
            .collect();
        for coord in &evicted {
            self.chunks.remove(coord);
        }

        if self.chunks.len() > self.max_chunks {
            let mut by_age: Vec<(u64, IVec2)> = self
                .chunks
                .values()
                .filter(|c| c.coord != head_chunk)
                .map(|c| (c.last_visited_ms, c.coord))
                .collect();
            by_age.sort_by_key(|&(t, c)| (t, c.x, c.y));
            let excess = self.chunks.len() - self.max_chunks;
            for &(_, coord) in by_age.iter().take(excess) {
                self.chunks.remove(&coord);
                evicted.push(coord);
            }
        }

        // Stable order so purges and logs replay identically
        evicted.sort_by_key(|c| (c.x, c.y));
        for &coord in &evicted {
            let purged = overlay.purge_chunk(coord);
            log::debug!("Evicted chunk ({}, {}), purged {} cells", coord.x, coord.y, purged);
        }
        evicted
    }

    pub fn is_loaded(&self, cell: IVec2) -> bool {
        self.chunks.contains_key(&chunk_of(cell))
    }

    pub fn chunk(&self, coord: IVec2) -> Option<&Chunk> {
        self.chunks.get(&coord)
    }

    pub fn loaded_count(&self) -> usize {
        self.chunks.len()
    }

    /// Pre-generated base block for `cell`, if its chunk holds one for `level`
    pub fn cached_base(&self, cell: IVec2, level: u32) -> Option<BlockType> {
        let coord = chunk_of(cell);
        let generated = self.chunks.get(&coord)?.generated.as_ref()?;
        if generated.level != level {
            return None;
        }
        Some(generated.get(cell - chunk_origin(coord)))
    }

    /// Force a chunk's timestamp (clock anomaly and recovery paths)
    pub fn set_last_visited(&mut self, coord: IVec2, ms: u64) {
        if let Some(chunk) = self.chunks.get_mut(&coord) {
            chunk.last_visited_ms = ms;
        }
    }
}
