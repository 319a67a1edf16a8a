use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;
use std::time::Instant;

use crossbeam_channel::{Receiver, Sender, unbounded};
use rayon::{ThreadPool, ThreadPoolBuilder};

use aloft_mesh_cpu::{ChunkMeshCPU, build_chunk_mesh};
use aloft_world::{ChunkCoord, TerrainParams, WorldSeed};

#[derive(Clone, Copy, Debug)]
pub struct GenJob {
    pub coord: ChunkCoord,
    pub lod: u32,
    pub job_id: u64,
}

pub struct GenResult {
    pub mesh: ChunkMeshCPU,
    pub job_id: u64,
    pub t_gen_ms: u32,
}

/// Worker pool for chunk generation. Jobs go in over a channel, finished
/// meshes come back over another; the owner thread applies results, so the
/// tables have a single writer. Workers only read the seed and params, which
/// stay immutable for the pool's lifetime.
pub struct Runtime {
    // Declared before the pool: dropping the sender disconnects the workers
    // so the pool can join on drop.
    job_tx: Sender<GenJob>,
    res_rx: Receiver<GenResult>,
    _pool: Arc<ThreadPool>,
    queued: Arc<AtomicUsize>,
    inflight: Arc<AtomicUsize>,
    next_job_id: u64,
    pub workers: usize,
}

impl Runtime {
    pub fn new(seed: Arc<WorldSeed>, params: Arc<TerrainParams>, workers: usize) -> Self {
        let workers = if workers == 0 {
            thread::available_parallelism()
                .map(|n| n.get().saturating_sub(1).max(1))
                .unwrap_or(4)
        } else {
            workers
        };

        let (job_tx, job_rx) = unbounded::<GenJob>();
        let (res_tx, res_rx) = unbounded::<GenResult>();
        let queued = Arc::new(AtomicUsize::new(0));
        let inflight = Arc::new(AtomicUsize::new(0));

        let pool = Arc::new(
            ThreadPoolBuilder::new()
                .num_threads(workers)
                .thread_name(|i| format!("aloft-gen-{i}"))
                .build()
                .expect("gen pool"),
        );
        for _ in 0..workers {
            let rx = job_rx.clone();
            let tx = res_tx.clone();
            let seed = Arc::clone(&seed);
            let params = Arc::clone(&params);
            let queued = Arc::clone(&queued);
            let inflight = Arc::clone(&inflight);
            pool.spawn(move || {
                while let Ok(job) = rx.recv() {
                    queued.fetch_sub(1, Ordering::Relaxed);
                    inflight.fetch_add(1, Ordering::Relaxed);
                    let t0 = Instant::now();
                    let mesh = build_chunk_mesh(job.coord, job.lod, &seed, &params);
                    let t_gen_ms = t0.elapsed().as_millis().min(u128::from(u32::MAX)) as u32;
                    let _ = tx.send(GenResult {
                        mesh,
                        job_id: job.job_id,
                        t_gen_ms,
                    });
                    inflight.fetch_sub(1, Ordering::Relaxed);
                }
            });
        }

        Self {
            job_tx,
            res_rx,
            _pool: pool,
            queued,
            inflight,
            next_job_id: 0,
            workers,
        }
    }

    pub fn submit(&mut self, coord: ChunkCoord, lod: u32) {
        self.next_job_id += 1;
        let job = GenJob {
            coord,
            lod,
            job_id: self.next_job_id,
        };
        self.queued.fetch_add(1, Ordering::Relaxed);
        if self.job_tx.send(job).is_err() {
            self.queued.fetch_sub(1, Ordering::Relaxed);
        }
    }

    /// Collects whatever finished since the last call, without waiting.
    pub fn drain(&self) -> Vec<GenResult> {
        self.res_rx.try_iter().collect()
    }

    /// Waits for one finished mesh. Returns None only when the workers are
    /// gone, which cannot happen while `self` is alive.
    pub fn recv_blocking(&self) -> Option<GenResult> {
        self.res_rx.recv().ok()
    }

    /// (queued, inflight) job counts, for debug overlays.
    pub fn queue_counts(&self) -> (usize, usize) {
        (
            self.queued.load(Ordering::Relaxed),
            self.inflight.load(Ordering::Relaxed),
        )
    }
}
