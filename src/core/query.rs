use crate::core::Catalog;

/// Which of the two selections runs first. The results differ: filtering
/// first yields up to `top` services of that protocol, taking the top
/// first yields only those protocol entries that are in the overall top.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum QueryOrder {
    #[default]
    FilterFirst,
    TopFirst,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Query {
    pub protocol: Option<String>,
    pub top: Option<i64>,
    pub order: QueryOrder,
}

impl Query {
    pub fn apply(&self, catalog: &Catalog) -> Catalog {
        match self.order {
            QueryOrder::FilterFirst => self.select_top(&self.filter(catalog)),
            QueryOrder::TopFirst => self.filter(&self.select_top(catalog)),
        }
    }

    fn filter(&self, catalog: &Catalog) -> Catalog {
        match &self.protocol {
            Some(protocol) => catalog.filter_by_protocol(protocol),
            None => catalog.clone(),
        }
    }

    fn select_top(&self, catalog: &Catalog) -> Catalog {
        match self.top {
            Some(n) => catalog.top_n(n),
            None => catalog.clone(),
        }
    }
}
