//! Network number equality and subnet membership.
//!
//! Both predicates take any mix of CIDR text and [`Cidr`] values. A malformed
//! input never aborts the check; it simply does not match.

use std::borrow::Cow;

use tracing::{debug, trace};

use crate::cidr::{Cidr, format_cidr, parse_cidr};
use crate::subnet::net_num_cidr;

/// A CIDR given either as text or as an already parsed pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CidrInput<'a> {
    Text(&'a str),
    Parsed(&'a Cidr),
}

impl<'a> CidrInput<'a> {
    /// Text form, rendering a parsed pair with [`format_cidr`].
    pub fn to_text(&self) -> Cow<'a, str> {
        match *self {
            CidrInput::Text(text) => Cow::Borrowed(text),
            CidrInput::Parsed(cidr) => Cow::Owned(format_cidr(cidr)),
        }
    }

    /// Structured form, or `None` if the text is not CIDR shaped.
    pub fn to_cidr(&self) -> Option<Cidr> {
        match *self {
            CidrInput::Text(text) => parse_cidr(text),
            CidrInput::Parsed(cidr) => Some(cidr.clone()),
        }
    }
}

impl<'a> From<&'a str> for CidrInput<'a> {
    fn from(text: &'a str) -> Self {
        CidrInput::Text(text)
    }
}

impl<'a> From<&'a String> for CidrInput<'a> {
    fn from(text: &'a String) -> Self {
        CidrInput::Text(text)
    }
}

impl<'a> From<&'a Cidr> for CidrInput<'a> {
    fn from(cidr: &'a Cidr) -> Self {
        CidrInput::Parsed(cidr)
    }
}

/// Check whether every input has the same network number.
///
/// A single input matches itself. An empty input list, or any input that is
/// unparsable or fails the arithmetic, yields `false`. Network numbers are
/// compared exactly as [`net_num_cidr`] renders them, so two spellings of one
/// IPv6 address at `/128` do not match.
///
/// # Examples
///
/// ```rust
/// use ipnum::match_net_num;
///
/// assert!(match_net_num(["192.168.1.1/24", "192.168.1.254/24"]));
/// assert!(!match_net_num(["192.168.1.1/24", "192.168.1.254/24", "192.168.2.1/24"]));
/// ```
pub fn match_net_num<'a, I>(inputs: I) -> bool
where
    I: IntoIterator,
    I::Item: Into<CidrInput<'a>>,
{
    let mut expected: Option<String> = None;

    for input in inputs {
        let Some(net) = comparable_net_num(input.into()) else {
            return false;
        };
        match &expected {
            None => expected = Some(net),
            Some(first) if *first == net => {}
            Some(_) => return false,
        }
    }

    expected.is_some()
}

fn comparable_net_num(input: CidrInput<'_>) -> Option<String> {
    let text = input.to_text();
    match net_num_cidr(&text, false) {
        Ok(Some(net)) => Some(net),
        Ok(None) => {
            debug!(cidr = %text, "skipping unparsable CIDR");
            None
        }
        Err(err) => {
            debug!(cidr = %text, error = %err, "skipping CIDR with invalid network number");
            None
        }
    }
}

/// Check whether any sample lies inside the template's subnet.
///
/// Each sample is given the template's prefix length and compared with
/// [`match_net_num`]. Samples that do not parse, or whose own prefix is
/// shorter than the template's, are skipped. Stops at the first match.
///
/// # Examples
///
/// ```rust
/// use ipnum::in_net_num;
///
/// assert!(in_net_num("10.0.0.0/8", ["10.1.2.3/32"]));
/// assert!(!in_net_num("10.0.0.0/24", ["10.1.2.3/8"]));
/// ```
pub fn in_net_num<'a, 'b, T, S>(template: T, samples: S) -> bool
where
    T: Into<CidrInput<'a>>,
    S: IntoIterator,
    S::Item: Into<CidrInput<'b>>,
{
    let template = template.into();
    let Some(template) = template.to_cidr() else {
        debug!(template = %template.to_text(), "template is not a CIDR");
        return false;
    };

    samples.into_iter().any(|sample| {
        let sample = sample.into();
        let Some(mut candidate) = sample.to_cidr() else {
            trace!(sample = %sample.to_text(), "skipping unparsable sample");
            return false;
        };
        if candidate.prefix_len < template.prefix_len {
            trace!(sample = %candidate, template = %template, "sample network is broader than template");
            return false;
        }
        candidate.prefix_len = template.prefix_len;
        match_net_num([&template, &candidate])
    })
}
