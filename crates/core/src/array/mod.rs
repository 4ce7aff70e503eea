use rand::Rng;

/// The live bar array driven by the visualiser.
///
/// Length is fixed for the lifetime of one visualisation session; only the
/// values and their positions change. Outside of construction the sole
/// mutator is replay application.
#[derive(Debug, Clone, PartialEq)]
pub struct ArrayState {
    values: Vec<f32>,
}

impl ArrayState {
    /// Creates an array of `length` independent uniform draws from [0, 1).
    pub fn random(length: usize) -> Self {
        let mut rng = rand::thread_rng();
        Self {
            values: (0..length).map(|_| rng.gen::<f32>()).collect(),
        }
    }

    /// Creates an array from explicit values.
    pub fn from_values(values: Vec<f32>) -> Self {
        Self { values }
    }

    pub fn values(&self) -> &[f32] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub(crate) fn values_mut(&mut self) -> &mut [f32] {
        &mut self.values
    }
}
