// Frame animation driven by a millisecond clock

use std::collections::HashMap;

use crate::engine::renderer::TextureHandle;

/// Integer id of an animation state (0 = the default/idle state)
pub type StateId = u32;

/// Maps animation states to texture frame lists and advances the current
/// frame against an externally sampled millisecond clock.
///
/// Lookups never fail: an unknown state resolves to an empty frame list and
/// simply draws nothing.
#[derive(Debug, Clone)]
pub struct Animation {
    states: HashMap<StateId, Vec<TextureHandle>>,
    current_state: StateId,
    current_frame: usize,
    framerate: f32,
    last_advance_ms: u64,
}

impl Default for Animation {
    fn default() -> Self {
        Self::new()
    }
}

impl Animation {
    pub fn new() -> Self {
        Self {
            states: HashMap::new(),
            current_state: 0,
            current_frame: 0,
            framerate: 1.0,
            last_advance_ms: 0,
        }
    }

    /// Register (or replace) the frame list for a state
    pub fn add_state(&mut self, state: StateId, frames: Vec<TextureHandle>) {
        self.states.insert(state, frames);
    }

    /// Switch the active state. No validation; an unknown id yields an
    /// empty frame list.
    pub fn set_state(&mut self, state: StateId) {
        self.current_state = state;
    }

    pub fn set_framerate(&mut self, framerate: f32) {
        self.framerate = framerate;
    }

    pub fn current_frame(&self) -> usize {
        self.current_frame
    }

    fn frames(&self) -> &[TextureHandle] {
        self.states
            .get(&self.current_state)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Advance the frame once more than `1000 / framerate` milliseconds have
    /// elapsed since the last advance, wrapping at the active state's frame
    /// count.
    pub fn update(&mut self, now_ms: u64) {
        let elapsed = now_ms.saturating_sub(self.last_advance_ms);

        if elapsed as f32 > 1000.0 / self.framerate {
            let count = self.frames().len();
            self.current_frame = if count == 0 {
                0
            } else {
                (self.current_frame + 1) % count
            };
            self.last_advance_ms = now_ms;
        }
    }

    /// Texture for the current frame.
    ///
    /// The frame index is re-validated against the active frame list here,
    /// since the state can change between `update` and draw.
    pub fn current_texture(&self) -> Option<TextureHandle> {
        let frames = self.frames();
        if frames.is_empty() {
            return None;
        }
        Some(frames[self.current_frame % frames.len()])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frames(n: usize) -> Vec<TextureHandle> {
        (0..n).map(TextureHandle::from_index).collect()
    }

    #[test]
    fn test_two_frame_cycle_at_one_fps() {
        let mut animation = Animation::new();
        animation.add_state(0, frames(2));
        animation.set_framerate(1.0);

        // Exactly 1000 ms is not enough; the threshold is strict.
        animation.update(1000);
        assert_eq!(animation.current_frame(), 0);

        animation.update(1001);
        assert_eq!(animation.current_frame(), 1);

        animation.update(2002);
        assert_eq!(animation.current_frame(), 0);

        animation.update(3003);
        assert_eq!(animation.current_frame(), 1);
    }

    #[test]
    fn test_frame_never_exceeds_frame_count() {
        let mut animation = Animation::new();
        animation.add_state(0, frames(3));
        animation.set_framerate(10.0);

        let mut now = 0;
        for _ in 0..50 {
            now += 250;
            animation.update(now);
            assert!(animation.current_frame() < 3);
        }
    }

    #[test]
    fn test_unknown_state_draws_nothing() {
        let mut animation = Animation::new();
        animation.add_state(0, frames(2));
        animation.set_state(7);

        animation.update(5000);
        assert_eq!(animation.current_frame(), 0);
        assert!(animation.current_texture().is_none());
    }

    #[test]
    fn test_frame_revalidated_after_state_change() {
        let mut animation = Animation::new();
        animation.add_state(0, frames(4));
        animation.add_state(1, frames(2));
        animation.set_framerate(1.0);

        animation.update(1001);
        animation.update(2002);
        animation.update(3003);
        assert_eq!(animation.current_frame(), 3);

        // Shorter state: the stale index must wrap on read, not panic.
        animation.set_state(1);
        let texture = animation.current_texture().unwrap();
        assert_eq!(texture, TextureHandle::from_index(1));
    }

    #[test]
    fn test_faster_framerate_advances_sooner() {
        let mut animation = Animation::new();
        animation.add_state(0, frames(2));
        animation.set_framerate(10.0);

        animation.update(101);
        assert_eq!(animation.current_frame(), 1);
    }
}
