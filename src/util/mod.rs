use core::fmt::Write;

pub mod aggregate;
pub mod column;
pub mod event;
pub mod hit_location;
pub mod roster;
pub mod source;
pub mod spray;
pub mod stat;

pub fn nth(n: usize) -> String {
    let mut buf = String::with_capacity(n.checked_ilog10().map_or(1, |x| x + 1) as usize + 2);
    let _ = write!(&mut buf, "{n}");
    if n / 10 % 10 == 1 {
        buf.push_str("th");
    } else {
        match n % 10 {
            1 => buf.push_str("st"),
            2 => buf.push_str("nd"),
            3 => buf.push_str("rd"),
            _ => buf.push_str("th"),
        }
    }
    buf
}

pub fn last_name(s: &str) -> &str {
    s.rsplit_once(' ').map_or(s, |x| x.1)
}

pub fn width(values: impl IntoIterator<Item = usize>) -> usize {
    values.into_iter().map(|n| n.checked_ilog10().map_or(1, |x| x + 1) as usize).max().unwrap_or(1)
}
