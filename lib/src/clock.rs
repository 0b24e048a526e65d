/// Logical tick counter. Only the engine advances it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Clock {
    time: i32,
}

impl Clock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn time(&self) -> i32 {
        self.time
    }

    pub(crate) fn tick(&mut self) -> i32 {
        self.time += 1;
        self.time
    }
}
