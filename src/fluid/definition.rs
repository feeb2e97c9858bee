use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct FluidDef {
    pub id: String,
    pub display_name: String,
    /// Set on flowing variants: the id of the canonical still form.
    #[serde(default)]
    pub still: Option<String>,
    /// Item id of this fluid's filled bucket, if one exists.
    #[serde(default)]
    pub bucket: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flowing_variant_names_its_still_form() {
        let def = FluidDef {
            id: "water_flowing".into(),
            display_name: "Flowing Water".into(),
            still: Some("water".into()),
            bucket: None,
        };

        assert_eq!(def.still.as_deref(), Some("water"));
    }
}
