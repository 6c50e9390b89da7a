use crate::march::{March, MarchOutcome, MAX_DIST};

#[derive(Copy, Clone, Default, Debug, PartialEq, Eq)]
pub struct Profile {
    pub camera_rays: usize, // one per shaded pixel
    pub hits: usize,        // marches that ended within MAX_DIST
    pub misses: usize,      // marches that went past MAX_DIST
    pub exhausted: usize,   // marches that ran out of steps, counted as hits
    pub steps: usize,       // total field evaluations during marching
}

impl Profile {
    pub fn new(
        camera_rays: usize,
        hits: usize,
        misses: usize,
        exhausted: usize,
        steps: usize,
    ) -> Self {
        Profile {
            camera_rays,
            hits,
            misses,
            exhausted,
            steps,
        }
    }

    pub fn record(&mut self, march: &March) {
        self.camera_rays += 1;
        self.steps += march.steps;
        if march.depth() > MAX_DIST {
            self.misses += 1;
        } else {
            self.hits += 1;
            if march.outcome == MarchOutcome::Exhausted {
                self.exhausted += 1;
            }
        }
    }

    pub fn combine(&self, other: Self) -> Self {
        Profile::new(
            self.camera_rays + other.camera_rays,
            self.hits + other.hits,
            self.misses + other.misses,
            self.exhausted + other.exhausted,
            self.steps + other.steps,
        )
    }

    pub fn average_steps(&self) -> f32 {
        if self.camera_rays == 0 {
            0.0
        } else {
            self.steps as f32 / self.camera_rays as f32
        }
    }

    pub fn pretty_print(&self, elapsed: f32, threads: usize) {
        let &Profile {
            camera_rays,
            hits,
            misses,
            exhausted,
            steps,
        } = self;
        info!(
            "{} total camera rays at {} per second and {} per second per thread",
            camera_rays,
            camera_rays as f32 / elapsed,
            camera_rays as f32 / elapsed / (threads as f32)
        );
        info!("{} hits, {} misses", hits, misses);
        if exhausted > 0 {
            warn!(
                "{} marches ran out of steps before converging and were shaded as hits",
                exhausted
            );
        }
        info!(
            "{} total march steps, {} per ray on average",
            steps,
            self.average_steps()
        );
    }
}
