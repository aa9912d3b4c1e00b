#![cfg(test)]

use javu::{Error, TreeMap, TreeSet};

/// The head-map live-window scenario: a sub-view shares storage with
/// the backing map, filters by its bound, and rejects out-of-range
/// insertion.
#[test]
fn head_map_live_window() {
    let mut m: TreeMap<i32, &str> = TreeMap::new();
    m.put(1, "a");
    m.put(5, "b");
    m.put(9, "c");

    let head = m.head_map(5, false);
    assert!(head.contains_key(&m, &1));
    assert!(!head.contains_key(&m, &5));
    assert_eq!(head.get(&m, &1), Some(&"a"));
    assert_eq!(head.get(&m, &9), None);

    assert_eq!(head.put(&mut m, 3, "d"), Ok(None));
    assert_eq!(m.get(&3), Some(&"d"));
    assert_eq!(head.put(&mut m, 7, "e"), Err(Error::KeyOutOfRange));
    assert!(!m.contains_key(&7));

    m.put(2, "f");
    assert_eq!(head.len(&m), 3);
    assert_eq!(head.first_entry(&m), Some((&1, &"a")));
    assert_eq!(head.last_entry(&m), Some((&3, &"d")));

    assert_eq!(head.remove(&mut m, &9), None);
    assert!(m.contains_key(&9));
    assert_eq!(head.remove(&mut m, &2), Some("f"));
}

#[test]
fn tail_and_sub_views_compose_with_navigation() {
    let m: TreeMap<i32, i32> = (0..10).map(|k| (k * 10, k)).collect();

    let tail = m.tail_map(35, true);
    assert_eq!(tail.first_entry(&m), Some((&40, &4)));

    let sub = m.sub_map(20, true, 60, false).unwrap();
    let mut c = sub.cursor(&m);
    let mut got = Vec::new();
    while c.has_next() {
        got.push(*c.next(&m).unwrap().0);
    }
    assert_eq!(got, [20, 30, 40, 50]);

    assert_eq!(m.ceiling_entry(&35), Some((&40, &4)));
    assert_eq!(m.floor_entry(&35), Some((&30, &3)));
    assert_eq!(m.higher_entry(&40), Some((&50, &5)));
    assert_eq!(m.lower_entry(&40), Some((&30, &3)));
    assert!(m.sub_map(60, true, 20, true).is_err());
}

#[test]
fn descending_view_mirrors_ascending() {
    let m: TreeMap<i32, i32> = [2, 7, 4].into_iter().map(|k| (k, k)).collect();
    let d = m.descending();
    let asc: Vec<i32> = m.keys().copied().collect();
    let mut desc = Vec::new();
    let mut c = d.cursor(&m);
    while c.has_next() {
        desc.push(*c.next(&m).unwrap().0);
    }
    desc.reverse();
    assert_eq!(asc, desc);
}

/// Cursor removal mid-walk keeps the traversal ordered and the map
/// consistent.
#[test]
fn cursor_driven_filtering() {
    let mut m: TreeMap<i32, i32> = (0..20).map(|k| (k, k)).collect();
    let mut c = m.cursor();
    while c.has_next() {
        let (k, _) = c.next(&m).unwrap();
        if k % 3 == 0 {
            c.remove(&mut m).unwrap();
        }
    }
    let left: Vec<i32> = m.keys().copied().collect();
    assert!(left.iter().all(|k| k % 3 != 0));
    assert_eq!(left.len(), 13);
}

#[test]
fn tree_set_views_and_navigation() {
    let mut s: TreeSet<i32> = [3, 1, 4, 1, 5, 9, 2, 6].into_iter().collect();
    assert_eq!(s.len(), 7);
    assert_eq!(s.first(), Some(&1));
    assert_eq!(s.last(), Some(&9));
    assert_eq!(s.ceiling(&7), Some(&9));
    assert_eq!(s.lower(&2), Some(&1));

    let mid = s.sub_set(2, true, 6, true).unwrap();
    assert!(mid.contains(&s, &4));
    assert!(!mid.contains(&s, &9));
    assert_eq!(mid.add(&mut s, 7), Err(Error::KeyOutOfRange));
    assert_eq!(mid.add(&mut s, 3), Ok(false));

    assert_eq!(s.poll_first(), Some(1));
    assert_eq!(s.poll_last(), Some(9));
}
