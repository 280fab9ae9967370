use serde::{Deserialize, Serialize};

/// One entry of the nmap-services file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceRecord {
    pub name: String,
    pub port: u16,
    pub protocol: String,
    pub frequency: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

impl ServiceRecord {
    /// The `port/protocol` token as written in the source file, e.g. `80/tcp`.
    pub fn port_proto(&self) -> String {
        format!("{}/{}", self.port, self.protocol)
    }
}

/// An ordered list of services. Queries return new catalogs and leave the
/// receiver untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Catalog {
    services: Vec<ServiceRecord>,
}

impl Catalog {
    pub fn new(services: Vec<ServiceRecord>) -> Self {
        Self { services }
    }

    pub fn len(&self) -> usize {
        self.services.len()
    }

    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ServiceRecord> {
        self.services.iter()
    }

    pub fn as_slice(&self) -> &[ServiceRecord] {
        &self.services
    }

    pub fn into_inner(self) -> Vec<ServiceRecord> {
        self.services
    }
}

impl From<Vec<ServiceRecord>> for Catalog {
    fn from(services: Vec<ServiceRecord>) -> Self {
        Self::new(services)
    }
}

impl FromIterator<ServiceRecord> for Catalog {
    fn from_iter<I: IntoIterator<Item = ServiceRecord>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl IntoIterator for Catalog {
    type Item = ServiceRecord;
    type IntoIter = std::vec::IntoIter<ServiceRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.services.into_iter()
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a ServiceRecord;
    type IntoIter = std::slice::Iter<'a, ServiceRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.services.iter()
    }
}
