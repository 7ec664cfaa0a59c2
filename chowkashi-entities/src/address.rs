#[rustfmt::skip]
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Address {
    pub street      : Option<String>,
    pub area        : Option<String>,
    pub city        : Option<String>,
    pub state       : Option<String>,
    pub postal_code : Option<String>,
    pub country     : Option<String>,
}

impl Address {
    pub fn is_empty(&self) -> bool {
        self.street.is_none()
            && self.area.is_none()
            && self.city.is_none()
            && self.state.is_none()
            && self.postal_code.is_none()
            && self.country.is_none()
    }

    /// Comma separated free text, e.g. for forward geocoding.
    pub fn to_query_string(&self) -> String {
        [
            &self.street,
            &self.area,
            &self.city,
            &self.state,
            &self.postal_code,
            &self.country,
        ]
        .into_iter()
        .filter_map(|x| x.as_deref().map(str::trim).filter(|x| !x.is_empty()))
        .collect::<Vec<_>>()
        .join(", ")
    }
}
