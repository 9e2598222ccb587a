use super::DrawCmd;
use crate::coords::Rect;

/// Ordered draw-command buffer produced by one paint pass.
#[derive(Debug, Default)]
pub struct DrawList {
    cmds: Vec<DrawCmd>,
    clip_depth: usize,
}

impl DrawList {
    pub fn new() -> Self {
        Self { cmds: Vec::new(), clip_depth: 0 }
    }

    #[inline]
    pub fn push(&mut self, cmd: DrawCmd) {
        self.cmds.push(cmd);
    }

    pub fn push_clip(&mut self, rect: Rect) {
        self.clip_depth += 1;
        self.cmds.push(DrawCmd::PushClip(rect));
    }

    pub fn pop_clip(&mut self) {
        debug_assert!(self.clip_depth > 0, "pop_clip without matching push");
        self.clip_depth = self.clip_depth.saturating_sub(1);
        self.cmds.push(DrawCmd::PopClip);
    }

    pub fn clear(&mut self) {
        self.cmds.clear();
        self.clip_depth = 0;
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.cmds.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cmds.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &DrawCmd> {
        self.cmds.iter()
    }
}
