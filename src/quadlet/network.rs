use std::fmt::{self, Display, Formatter};

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Network {
    pub name: String,
    pub driver: Option<String>,
}

impl Display for Network {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        writeln!(f, "[Network]")?;

        if let Some(driver) = &self.driver {
            writeln!(f, "Driver={driver}")?;
        }

        writeln!(f, "NetworkName={}", self.name)
    }
}
