use std::fmt::{self, Display, Formatter};

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Volume {
    pub name: String,
    pub driver: Option<String>,
}

impl Display for Volume {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        writeln!(f, "[Volume]")?;

        if let Some(driver) = &self.driver {
            writeln!(f, "Driver={driver}")?;
        }

        writeln!(f, "VolumeName={}", self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn driver_line_only_when_set() {
        let volume = Volume {
            name: "data".to_owned(),
            driver: None,
        };
        assert_eq!(volume.to_string(), "[Volume]\nVolumeName=data\n");

        let volume = Volume {
            driver: Some("local".to_owned()),
            ..volume
        };
        assert_eq!(
            volume.to_string(),
            "[Volume]\nDriver=local\nVolumeName=data\n"
        );
    }
}
