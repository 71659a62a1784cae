#[derive(Debug, Clone, Eq, Hash, PartialEq)]
pub struct Repository {
    pub name: String,
    pub owner: String,
}

impl Repository {
    pub fn new(owner: impl ToString, name: impl ToString) -> Self {
        Self {
            name: name.to_string(),
            owner: owner.to_string(),
        }
    }

    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner, self.name)
    }
}
