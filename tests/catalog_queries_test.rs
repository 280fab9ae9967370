use nmap_services::core::catalog::parse_str;
use nmap_services::{Catalog, ServiceRecord};
use std::fmt::Write;
use std::io::Write as _;
use tempfile::NamedTempFile;

const TCP: usize = 8351;
const UDP: usize = 19022;
const SCTP: usize = 52;
const TOTAL: usize = TCP + UDP + SCTP;

/// A services file shaped like the real one: 27425 entries with tcp, udp and
/// sctp interleaved. tcp frequencies stay below 0.5 while udp spans [0, 1), so
/// the overall top is all udp.
fn full_size_file() -> String {
    let mut content = String::from("# synthetic nmap-services\n#\n");
    let (mut tcp, mut udp, mut sctp) = (0usize, 0usize, 0usize);

    for k in 0..TOTAL {
        if sctp < SCTP && k % 500 == 499 {
            writeln!(content, "sctp-{}\t{}/sctp\t0.000000", sctp, 1 + sctp).unwrap();
            sctp += 1;
        } else if tcp < TCP && (k % 3 == 0 || udp == UDP) {
            let frequency = 0.5 * ((tcp * 7919) % TCP) as f64 / TCP as f64;
            writeln!(
                content,
                "tcp-{}\t{}/tcp\t{:.6}\t# tcp service {}",
                tcp,
                1 + tcp,
                frequency,
                tcp
            )
            .unwrap();
            tcp += 1;
        } else {
            let frequency = ((udp * 104_729) % UDP) as f64 / UDP as f64;
            writeln!(content, "udp-{}\t{}/udp\t{:.6}", udp, 1 + udp % 65535, frequency).unwrap();
            udp += 1;
        }
    }

    assert_eq!((tcp, udp, sctp), (TCP, UDP, SCTP));
    content
}

fn is_sorted_descending(catalog: &Catalog) -> bool {
    catalog
        .as_slice()
        .windows(2)
        .all(|w| w[0].frequency >= w[1].frequency)
}

#[test]
fn test_full_size_counts() {
    let catalog = parse_str(&full_size_file()).unwrap();

    assert_eq!(catalog.len(), TOTAL);
    assert_eq!(catalog.tcp().len(), TCP);
    assert_eq!(catalog.udp().len(), UDP);
    assert_eq!(catalog.filter_by_protocol("sctp").len(), SCTP);
    assert!(catalog.tcp().len() + catalog.udp().len() <= catalog.len());
}

#[test]
fn test_top_n_length_is_clamped() {
    let catalog = parse_str(&full_size_file()).unwrap();
    let len = catalog.len() as i64;

    let cases = [
        (-1, 0),
        (0, 0),
        (1, 1),
        (10, 10),
        (len, TOTAL),
        (len + 1, TOTAL),
        (100_000, TOTAL),
    ];
    for (n, want) in cases {
        assert_eq!(catalog.top_n(n).len(), want, "top_n({})", n);
    }
}

#[test]
fn test_top_n_over_length_is_full_catalog_sorted() {
    let catalog = parse_str(&full_size_file()).unwrap();
    let top = catalog.top_n(catalog.len() as i64 + 1);

    assert_eq!(top.len(), catalog.len());
    assert!(is_sorted_descending(&top));

    let mut original: Vec<&ServiceRecord> = catalog.iter().collect();
    let mut sorted: Vec<&ServiceRecord> = top.iter().collect();
    original.sort_by(|a, b| a.name.cmp(&b.name));
    sorted.sort_by(|a, b| a.name.cmp(&b.name));
    assert_eq!(original, sorted);
}

#[test]
fn test_zero_frequency_ties_keep_file_order() {
    let catalog = parse_str(&full_size_file()).unwrap();
    let top = catalog.top_n(catalog.len() as i64);

    let zeros = |c: &Catalog| -> Vec<String> {
        c.iter()
            .filter(|s| s.frequency == 0.0)
            .map(|s| s.name.clone())
            .collect()
    };

    let in_file = zeros(&catalog);
    assert!(in_file.len() >= SCTP);
    assert_eq!(zeros(&top), in_file);
}

#[test]
fn test_filter_then_top_differs_from_top_then_filter() {
    let catalog = parse_str(&full_size_file()).unwrap();

    let tcp = catalog.tcp();
    assert_eq!(tcp.len(), TCP);

    let tcp_top = tcp.top_n(10);
    assert_eq!(tcp_top.len(), 10);
    assert!(tcp_top.iter().all(|s| s.protocol == "tcp"));
    assert!(is_sorted_descending(&tcp_top));

    let top_tcp = catalog.top_n(10).tcp();
    assert!(top_tcp.len() < 10);

    for (n, want) in [(-1, 0), (0, 0), (1, 1), (10, 10), (8352, TCP), (100_000, TCP)] {
        assert_eq!(catalog.tcp().top_n(n).len(), want, "tcp top_n({})", n);
    }
    for (n, want) in [(-1, 0), (0, 0), (19_023, UDP), (100_000, UDP)] {
        assert_eq!(catalog.udp().top_n(n).len(), want, "udp top_n({})", n);
    }
    assert_eq!(catalog.top_n(100_000).tcp().len(), TCP);
    assert_eq!(catalog.top_n(100_000).udp().len(), UDP);
}

#[test]
fn test_load_from_disk_is_idempotent() {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(full_size_file().as_bytes()).unwrap();

    let first = Catalog::load(file.path()).unwrap();
    let second = Catalog::load(file.path()).unwrap();

    assert_eq!(first.len(), TOTAL);
    assert_eq!(first, second);
}
