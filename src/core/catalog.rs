use crate::core::{Catalog, ServiceRecord};
use crate::utils::error::{Result, ServicesError};
use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;

static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("whitespace pattern is valid"));

impl Catalog {
    /// Reads and parses an nmap-services file. Any malformed line fails the
    /// whole load.
    pub fn load(path: impl AsRef<Path>) -> Result<Catalog> {
        let path = path.as_ref();
        let data = std::fs::read(path).map_err(|source| ServicesError::OpenError {
            path: path.to_path_buf(),
            source,
        })?;
        parse_bytes(&data)
    }

    /// Services whose protocol equals `protocol` exactly, in original order.
    pub fn filter_by_protocol(&self, protocol: &str) -> Catalog {
        self.iter()
            .filter(|s| s.protocol == protocol)
            .cloned()
            .collect()
    }

    pub fn tcp(&self) -> Catalog {
        self.filter_by_protocol("tcp")
    }

    pub fn udp(&self) -> Catalog {
        self.filter_by_protocol("udp")
    }

    /// The `n` most frequent services, highest first. Equal frequencies keep
    /// their relative order. `n` is clamped to `0..=len`.
    pub fn top_n(&self, n: i64) -> Catalog {
        let len = i64::try_from(self.len()).unwrap_or(i64::MAX);
        let take = n.clamp(0, len) as usize;

        let mut sorted = self.as_slice().to_vec();
        sorted.sort_by(|a, b| b.frequency.total_cmp(&a.frequency));
        sorted.truncate(take);
        Catalog::new(sorted)
    }

    /// Distinct protocols in order of first appearance.
    pub fn protocols(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for service in self {
            if !seen.contains(&service.protocol.as_str()) {
                seen.push(&service.protocol);
            }
        }
        seen
    }
}

pub fn parse_bytes(data: &[u8]) -> Result<Catalog> {
    let content = std::str::from_utf8(data).map_err(|e| {
        let line = data[..e.valid_up_to()]
            .iter()
            .filter(|b| **b == b'\n')
            .count()
            + 1;
        ServicesError::ParseError {
            line,
            message: "file is not valid UTF-8".to_string(),
        }
    })?;
    parse_str(content)
}

pub fn parse_str(content: &str) -> Result<Catalog> {
    let mut services = Vec::new();

    for (index, raw) in content.lines().enumerate() {
        if let Some(service) = parse_line(raw, index + 1)? {
            services.push(service);
        }
    }

    tracing::debug!("Parsed {} services", services.len());
    Ok(Catalog::new(services))
}

fn parse_line(raw: &str, line: usize) -> Result<Option<ServiceRecord>> {
    let text = raw.trim();
    if text.is_empty() || text.starts_with('#') {
        return Ok(None);
    }

    // name, port/protocol, frequency, then the untouched remainder
    let mut fields = WHITESPACE.splitn(text, 4);
    let name = fields.next().unwrap_or_default();
    let port_proto = fields
        .next()
        .ok_or_else(|| parse_error(line, "missing port/protocol field"))?;
    let frequency = fields
        .next()
        .ok_or_else(|| parse_error(line, "missing frequency field"))?;
    let comment = fields.next().map(str::to_string);

    let (port, protocol) = port_proto.split_once('/').ok_or_else(|| {
        parse_error(line, &format!("expected port/protocol, got {:?}", port_proto))
    })?;
    let port: u16 = port
        .parse()
        .map_err(|e| parse_error(line, &format!("invalid port {:?}: {}", port, e)))?;
    if protocol.is_empty() {
        return Err(parse_error(line, "empty protocol"));
    }

    let frequency: f64 = frequency
        .parse()
        .map_err(|e| parse_error(line, &format!("invalid frequency {:?}: {}", frequency, e)))?;
    if !frequency.is_finite() || frequency < 0.0 {
        return Err(parse_error(
            line,
            &format!("frequency must be a non-negative number, got {}", frequency),
        ));
    }

    Ok(Some(ServiceRecord {
        name: name.to_string(),
        port,
        protocol: protocol.to_string(),
        frequency,
        comment,
    }))
}

fn parse_error(line: usize, message: &str) -> ServicesError {
    ServicesError::ParseError {
        line,
        message: message.to_string(),
    }
}
