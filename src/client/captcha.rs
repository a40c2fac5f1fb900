use rand::Rng;

/// Addition challenge shown above the submit control
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MathCaptcha {
    pub num1: u32,
    pub num2: u32,
}

impl MathCaptcha {
    const MIN_OPERAND: u32 = 1;
    const MAX_OPERAND: u32 = 10;

    pub fn new(num1: u32, num2: u32) -> Self {
        Self { num1, num2 }
    }

    /// Fresh challenge with both operands drawn from 1..=10
    pub fn generate() -> Self {
        let mut rng = rand::thread_rng();
        Self {
            num1: rng.gen_range(Self::MIN_OPERAND..=Self::MAX_OPERAND),
            num2: rng.gen_range(Self::MIN_OPERAND..=Self::MAX_OPERAND),
        }
    }

    pub fn question(&self) -> String {
        format!("What is {} + {}?", self.num1, self.num2)
    }

    /// Anything that does not parse as the exact sum fails
    pub fn check(&self, answer: &str) -> bool {
        answer
            .trim()
            .parse::<u32>()
            .map(|value| value == self.num1 + self.num2)
            .unwrap_or(false)
    }
}
