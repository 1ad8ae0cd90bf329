//! Pipe obstacles
//!
//! A [`Pipe`] is one top/bottom pair sharing a horizontal centre. The
//! [`PipeStream`] spawns pairs on a timer at the right edge, scrolls them
//! left, retires them once they leave the screen and tracks pass-through
//! scoring with a per-pipe flag.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::rect::Rect;
use crate::config::GameConfig;

/// Geometry shared by every pipe in a stream
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PipeLayout {
    pub window_width: f32,
    pub window_height: f32,
    /// Top of the ground strip; gaps are placed above it
    pub floor_y: f32,
    pub width: f32,
    pub gap_min: f32,
    pub gap_max: f32,
    pub min_stub: f32,
    pub spawn_offset: f32,
}

impl PipeLayout {
    pub fn from_config(config: &GameConfig) -> Self {
        Self {
            window_width: config.window_width,
            window_height: config.window_height,
            floor_y: config.floor_y(),
            width: config.pipe_width,
            gap_min: config.pipe_gap_min,
            gap_max: config.pipe_gap_max,
            min_stub: config.pipe_min_stub,
            spawn_offset: config.pipe_spawn_offset,
        }
    }

    /// Horizontal centre of freshly spawned pipes
    pub fn spawn_x(&self) -> f32 {
        self.window_width + self.spawn_offset
    }

    /// Admissible range for the centre of a gap of `gap_size`
    pub fn gap_center_range(&self, gap_size: f32) -> (f32, f32) {
        let lo = self.floor_y + self.min_stub + gap_size / 2.0;
        let hi = self.window_height - self.min_stub - gap_size / 2.0;
        // Degenerate layouts collapse onto the midpoint instead of inverting
        if hi < lo {
            let mid = (lo + hi) / 2.0;
            (mid, mid)
        } else {
            (lo, hi)
        }
    }
}

/// Vertical band the gap centre is drawn from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GapZone {
    Lower,
    Middle,
    Upper,
}

impl GapZone {
    pub fn from_index(index: u32) -> Self {
        match index {
            0 => GapZone::Lower,
            1 => GapZone::Middle,
            _ => GapZone::Upper,
        }
    }

    /// Sub-range of `(lo, hi)` covered by this zone (thirds)
    pub fn slice(self, lo: f32, hi: f32) -> (f32, f32) {
        let third = (hi - lo) / 3.0;
        match self {
            GapZone::Lower => (lo, lo + third),
            GapZone::Middle => (lo + third, lo + 2.0 * third),
            GapZone::Upper => (lo + 2.0 * third, hi),
        }
    }
}

/// Draw a gap size and centre for a new pipe
pub fn pick_gap<R: Rng>(layout: &PipeLayout, rng: &mut R) -> (f32, f32) {
    let gap_size = if layout.gap_max > layout.gap_min {
        rng.random_range(layout.gap_min..=layout.gap_max)
    } else {
        layout.gap_min
    };
    let (lo, hi) = layout.gap_center_range(gap_size);
    let zone = GapZone::from_index(rng.random_range(0..3));
    let (zone_lo, zone_hi) = zone.slice(lo, hi);
    let gap_y = if zone_hi > zone_lo {
        rng.random_range(zone_lo..=zone_hi)
    } else {
        zone_lo
    };
    (gap_y, gap_size)
}

/// A top/bottom pipe pair
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pipe {
    pub id: u32,
    /// Horizontal centre
    pub x: f32,
    /// Vertical centre of the gap
    pub gap_y: f32,
    pub gap_size: f32,
    pub width: f32,
    /// Top pipe extends up to here
    pub ceiling: f32,
    /// Set once when the bird passes; never cleared
    pub scored: bool,
}

impl Pipe {
    pub fn new(id: u32, x: f32, gap_y: f32, gap_size: f32, layout: &PipeLayout) -> Self {
        Self {
            id,
            x,
            gap_y,
            gap_size,
            width: layout.width,
            ceiling: layout.window_height,
            scored: false,
        }
    }

    pub fn gap_bottom(&self) -> f32 {
        self.gap_y - self.gap_size / 2.0
    }

    pub fn gap_top(&self) -> f32 {
        self.gap_y + self.gap_size / 2.0
    }

    pub fn left(&self) -> f32 {
        self.x - self.width / 2.0
    }

    pub fn right(&self) -> f32 {
        self.x + self.width / 2.0
    }

    /// Bottom pipe, from y = 0 up to the gap
    pub fn bottom_rect(&self) -> Rect {
        Rect::new(self.left(), 0.0, self.width, self.gap_bottom())
    }

    /// Top pipe, from the gap up to the ceiling
    pub fn top_rect(&self) -> Rect {
        let top = self.gap_top();
        Rect::new(self.left(), top, self.width, (self.ceiling - top).max(0.0))
    }

    pub fn collides(&self, rect: &Rect) -> bool {
        self.top_rect().overlaps(rect) || self.bottom_rect().overlaps(rect)
    }

    /// Right edge has crossed the left screen boundary
    pub fn is_off_screen(&self) -> bool {
        self.right() < 0.0
    }
}

/// Live pipes in creation order (= left-to-right) plus the spawn timer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipeStream {
    pub layout: PipeLayout,
    pub pipes: Vec<Pipe>,
    /// Seconds accumulated toward the next spawn
    pub spawn_timer: f32,
    next_id: u32,
}

impl PipeStream {
    pub fn new(layout: PipeLayout) -> Self {
        Self {
            layout,
            pipes: Vec::new(),
            spawn_timer: 0.0,
            next_id: 1,
        }
    }

    /// Advance the stream. Returns the id of a pipe spawned this step, if any.
    pub fn update<R: Rng>(
        &mut self,
        dt: f32,
        scroll_speed: f32,
        spawn_interval: f32,
        rng: &mut R,
    ) -> Option<u32> {
        self.spawn_timer += dt;
        let mut spawned = None;
        if self.spawn_timer >= spawn_interval {
            let (gap_y, gap_size) = pick_gap(&self.layout, rng);
            spawned = Some(self.spawn(self.layout.spawn_x(), gap_y, gap_size));
            self.spawn_timer = 0.0;
        }

        for pipe in &mut self.pipes {
            pipe.x -= scroll_speed * dt;
        }
        self.pipes.retain(|p| !p.is_off_screen());

        spawned
    }

    /// Append a pipe at an explicit position
    pub fn spawn(&mut self, x: f32, gap_y: f32, gap_size: f32) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        self.pipes.push(Pipe::new(id, x, gap_y, gap_size, &self.layout));
        log::debug!("Pipe {} spawned: gap_y={:.1}, gap={:.1}", id, gap_y, gap_size);
        id
    }

    /// True iff `rect` overlaps the top or bottom of any live pipe
    pub fn check_collision(&self, rect: &Rect) -> bool {
        self.pipes.iter().any(|p| p.collides(rect))
    }

    /// Mark every unscored pipe left of `bird_x` as scored; returns how many
    pub fn check_score(&mut self, bird_x: f32) -> u32 {
        let mut points = 0;
        for pipe in self.pipes.iter_mut().filter(|p| !p.scored && p.x < bird_x) {
            pipe.scored = true;
            points += 1;
            log::debug!("Pipe {} passed", pipe.id);
        }
        points
    }

    /// Drop all pipes and restart the spawn timer
    pub fn reset(&mut self) {
        self.pipes.clear();
        self.spawn_timer = 0.0;
    }

    /// Live pipe rectangles as (top, bottom) pairs
    pub fn rects(&self) -> Vec<(Rect, Rect)> {
        self.pipes.iter().map(|p| (p.top_rect(), p.bottom_rect())).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn stream() -> PipeStream {
        PipeStream::new(PipeLayout::from_config(&GameConfig::default()))
    }

    #[test]
    fn test_spawns_on_interval() {
        let mut s = stream();
        let mut rng = Pcg32::seed_from_u64(1);

        for _ in 0..29 {
            assert!(s.update(0.05, 200.0, 1.5, &mut rng).is_none());
        }
        assert!(s.pipes.is_empty());

        // 30 * 0.05 reaches the interval (allowing for float accumulation)
        let mut spawned = s.update(0.05, 200.0, 1.5, &mut rng);
        if spawned.is_none() {
            spawned = s.update(0.05, 200.0, 1.5, &mut rng);
        }
        assert!(spawned.is_some());
        assert_eq!(s.pipes.len(), 1);
        assert_eq!(s.spawn_timer, 0.0);
        // Spawned at the right edge, then scrolled by this step
        let expected = s.layout.spawn_x() - 200.0 * 0.05;
        assert!((s.pipes[0].x - expected).abs() < 1e-3);
    }

    #[test]
    fn test_scrolls_and_retires() {
        let mut s = stream();
        let mut rng = Pcg32::seed_from_u64(2);
        s.spawn(10.0, 300.0, 150.0);
        s.spawn(300.0, 300.0, 150.0);

        // First pipe's right edge is at 45; move it 50 left
        s.update(0.25, 200.0, 100.0, &mut rng);
        assert_eq!(s.pipes.len(), 1);
        assert!((s.pipes[0].x - 250.0).abs() < 1e-3);
    }

    #[test]
    fn test_pipe_rects_frame_the_gap() {
        let s = stream();
        let pipe = Pipe::new(1, 200.0, 300.0, 100.0, &s.layout);
        let bottom = pipe.bottom_rect();
        let top = pipe.top_rect();
        assert_eq!(bottom.y, 0.0);
        assert_eq!(bottom.top(), 250.0);
        assert_eq!(top.bottom(), 350.0);
        assert_eq!(top.top(), s.layout.window_height);
        assert_eq!(bottom.left(), 200.0 - s.layout.width / 2.0);
        assert_eq!(top.width, s.layout.width);
    }

    #[test]
    fn test_collision_inside_gap_is_safe() {
        let mut s = stream();
        s.spawn(200.0, 300.0, 100.0);

        let in_gap = Rect::new(190.0, 290.0, 20.0, 20.0);
        assert!(!s.check_collision(&in_gap));

        let hits_top = Rect::new(190.0, 340.0, 20.0, 20.0);
        assert!(s.check_collision(&hits_top));

        let hits_bottom = Rect::new(190.0, 240.0, 20.0, 20.0);
        assert!(s.check_collision(&hits_bottom));

        // Resting exactly on the bottom pipe's lip is not a hit
        let on_lip = Rect::new(190.0, 250.0, 20.0, 20.0);
        assert!(!s.check_collision(&on_lip));
    }

    #[test]
    fn test_score_counts_each_pipe_once() {
        let mut s = stream();
        s.spawn(100.0, 300.0, 150.0);
        s.spawn(300.0, 300.0, 150.0);

        assert_eq!(s.check_score(50.0), 0);
        assert_eq!(s.check_score(133.0), 1);
        assert_eq!(s.check_score(133.0), 0);
        assert!(s.pipes[0].scored);
        assert!(!s.pipes[1].scored);
    }

    #[test]
    fn test_score_multiple_in_one_call() {
        let mut s = stream();
        s.spawn(100.0, 300.0, 150.0);
        s.spawn(120.0, 300.0, 150.0);
        s.spawn(500.0, 300.0, 150.0);
        assert_eq!(s.check_score(200.0), 2);
        assert_eq!(s.check_score(200.0), 0);
    }

    #[test]
    fn test_reset_clears_pipes_and_timer() {
        let mut s = stream();
        let mut rng = Pcg32::seed_from_u64(3);
        s.spawn(100.0, 300.0, 150.0);
        s.update(0.5, 200.0, 10.0, &mut rng);
        s.reset();
        assert!(s.pipes.is_empty());
        assert_eq!(s.spawn_timer, 0.0);
    }

    #[test]
    fn test_gaps_always_fit_on_screen() {
        let layout = PipeLayout::from_config(&GameConfig::default());
        let mut rng = Pcg32::seed_from_u64(42);
        let mut zones_seen = [false; 3];
        for _ in 0..2000 {
            let (gap_y, gap_size) = pick_gap(&layout, &mut rng);
            assert!(gap_size >= layout.gap_min && gap_size <= layout.gap_max);
            assert!(gap_y - gap_size / 2.0 >= layout.floor_y + layout.min_stub - 1e-3);
            assert!(gap_y + gap_size / 2.0 <= layout.window_height - layout.min_stub + 1e-3);

            let (lo, hi) = layout.gap_center_range(gap_size);
            let t = (gap_y - lo) / (hi - lo);
            zones_seen[((t * 3.0) as usize).min(2)] = true;
        }
        assert_eq!(zones_seen, [true; 3]);
    }

    #[test]
    fn test_zone_slices_partition_range() {
        let (lo, hi) = (100.0, 400.0);
        assert_eq!(GapZone::Lower.slice(lo, hi), (100.0, 200.0));
        assert_eq!(GapZone::Middle.slice(lo, hi), (200.0, 300.0));
        assert_eq!(GapZone::Upper.slice(lo, hi), (300.0, 400.0));
    }
}
