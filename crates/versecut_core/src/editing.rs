use tracing::debug;
use uuid::Uuid;

use crate::clip::Clip;
use crate::error::{CoreError, Result};
use crate::timeline::Timeline;
use crate::track::Track;
use crate::types::{TimeMs, CLIP_GAP, MIN_CLIP_DURATION};

impl Track {
    /// Drag the left edge of a clip to `new_start`.
    ///
    /// The predecessor, if any, gets its end moved to `new_start - 1` so the
    /// two clips stay one millisecond apart. Both the clip and its
    /// predecessor must keep at least [`MIN_CLIP_DURATION`]; otherwise nothing
    /// moves and the reason is returned.
    pub fn update_clip_start(&mut self, clip_id: Uuid, new_start: TimeMs) -> Result<()> {
        let idx = self
            .index_of(clip_id)
            .ok_or(CoreError::ClipNotFound(clip_id))?;
        let clip = &self.clips()[idx];

        if new_start < TimeMs::ZERO {
            return self.reject(CoreError::NegativeStart { id: clip_id });
        }
        let new_duration = clip.end_time() - new_start;
        if new_duration < MIN_CLIP_DURATION {
            return self.reject(CoreError::ClipTooShort {
                id: clip_id,
                duration: new_duration,
            });
        }

        let prev_end = new_start - CLIP_GAP;
        if let Some(prev) = idx.checked_sub(1).map(|i| &self.clips()[i]) {
            let prev_duration = prev_end - prev.start_time();
            if prev_duration < MIN_CLIP_DURATION {
                return self.reject(CoreError::NeighborTooShort {
                    id: prev.id(),
                    duration: prev_duration,
                });
            }
        }

        let clips = self.clips_mut();
        if idx > 0 {
            clips[idx - 1].set_end_time(prev_end);
        }
        clips[idx].set_start_time(new_start);
        Ok(())
    }

    /// Drag the right edge of a clip to `new_end`.
    ///
    /// Mirror of [`Track::update_clip_start`]: the successor's start follows
    /// to `new_end + 1`, under the same minimum-duration checks. A `new_end`
    /// whose arithmetic leaves the `i64` range is rejected.
    pub fn update_clip_end(&mut self, clip_id: Uuid, new_end: TimeMs) -> Result<()> {
        let idx = self
            .index_of(clip_id)
            .ok_or(CoreError::ClipNotFound(clip_id))?;
        let clip = &self.clips()[idx];

        let out_of_range = CoreError::TimeOutOfRange {
            id: clip_id,
            time: new_end,
        };
        let Some(new_duration) = new_end.checked_sub(clip.start_time()) else {
            return self.reject(out_of_range);
        };
        if new_duration < MIN_CLIP_DURATION {
            return self.reject(CoreError::ClipTooShort {
                id: clip_id,
                duration: new_duration,
            });
        }

        let Some(next_start) = new_end.checked_add(CLIP_GAP) else {
            return self.reject(out_of_range);
        };
        if let Some(next) = self.clips().get(idx + 1) {
            let next_duration = next.end_time() - next_start;
            if next_duration < MIN_CLIP_DURATION {
                return self.reject(CoreError::NeighborTooShort {
                    id: next.id(),
                    duration: next_duration,
                });
            }
        }

        let clips = self.clips_mut();
        if let Some(next) = clips.get_mut(idx + 1) {
            next.set_start_time(next_start);
        }
        clips[idx].set_end_time(new_end);
        Ok(())
    }

    /// Split a clip in two at `at`.
    ///
    /// The original clip keeps its id and `[start, at]`; the right half is a
    /// copy under a new id covering `[at + 1, end]`. Returns the new id.
    pub fn split_clip(&mut self, clip_id: Uuid, at: TimeMs) -> Result<Uuid> {
        let idx = self
            .index_of(clip_id)
            .ok_or(CoreError::ClipNotFound(clip_id))?;
        let clip = &self.clips()[idx];

        let out_of_range = CoreError::TimeOutOfRange { id: clip_id, time: at };
        let Some(left_duration) = at.checked_sub(clip.start_time()) else {
            return self.reject(out_of_range);
        };
        if left_duration < MIN_CLIP_DURATION {
            return self.reject(CoreError::ClipTooShort {
                id: clip_id,
                duration: left_duration,
            });
        }
        let Some(right_start) = at.checked_add(CLIP_GAP) else {
            return self.reject(out_of_range);
        };
        let right: Clip = clip.duplicate_over(right_start, clip.end_time());
        if right.duration() < MIN_CLIP_DURATION {
            return self.reject(CoreError::ClipTooShort {
                id: right.id(),
                duration: right.duration(),
            });
        }

        let right_id = right.id();
        let clips = self.clips_mut();
        clips[idx].set_end_time(at);
        clips.insert(idx + 1, right);
        Ok(right_id)
    }
}

impl Timeline {
    /// Resize the left edge of a clip on whichever track holds it.
    pub fn trim_clip_start(&mut self, clip_id: Uuid, new_start: TimeMs) -> Result<()> {
        self.track_of_clip_mut(clip_id)
            .ok_or(CoreError::ClipNotFound(clip_id))?
            .update_clip_start(clip_id, new_start)
    }

    /// Resize the right edge of a clip on whichever track holds it.
    pub fn trim_clip_end(&mut self, clip_id: Uuid, new_end: TimeMs) -> Result<()> {
        self.track_of_clip_mut(clip_id)
            .ok_or(CoreError::ClipNotFound(clip_id))?
            .update_clip_end(clip_id, new_end)
    }

    pub fn split_clip(&mut self, clip_id: Uuid, at: TimeMs) -> Result<Uuid> {
        self.track_of_clip_mut(clip_id)
            .ok_or(CoreError::ClipNotFound(clip_id))?
            .split_clip(clip_id, at)
    }

    /// Remove a clip by its id. Returns the removed clip.
    pub fn remove_clip(&mut self, clip_id: Uuid) -> Result<Clip> {
        let clip = self
            .track_of_clip_mut(clip_id)
            .ok_or(CoreError::ClipNotFound(clip_id))?
            .remove_clip(clip_id)?;
        debug!(clip = %clip_id, kind = %clip.clip_type(), "clip removed");
        Ok(clip)
    }
}
