mod test_support;

use serde_json::json;
use test_support::{request_ok, spawn_sidecar, temp_dir};

#[test]
fn empty_roster_exports_nothing() {
    let (mut child, mut stdin, mut reader) = spawn_sidecar();

    let res = request_ok(&mut stdin, &mut reader, "1", "export.csv", json!({}));
    assert_eq!(res["hasData"], json!(false));
    assert_eq!(res["rowsExported"], json!(0));
    assert!(res.get("csv").is_none());

    drop(stdin);
    let _ = child.wait();
}

#[test]
fn exported_csv_parses_back_to_the_same_marks() {
    let (mut child, mut stdin, mut reader) = spawn_sidecar();
    let rows = [
        ("Lovelace, Ada", 98, 91, 88),
        ("Quote \"Q\" Person", 61, 59, 60),
        ("Plain", 12, 34, 56),
    ];
    for (i, (name, m, p, e)) in rows.iter().enumerate() {
        let _ = request_ok(
            &mut stdin,
            &mut reader,
            &format!("add-{}", i),
            "students.add",
            json!({ "name": name, "maths": m, "physics": p, "english": e }),
        );
    }

    let res = request_ok(&mut stdin, &mut reader, "export", "export.csv", json!({}));
    assert_eq!(res["hasData"], json!(true));
    assert_eq!(res["filename"], json!("student_results_filtered.csv"));
    assert_eq!(res["mimeType"], json!("text/csv"));
    assert_eq!(res["rowsExported"], json!(3));
    assert_eq!(res["sha256"].as_str().map(|s| s.len()), Some(64));
    assert!(res["exportedAt"].is_string());

    let text = res["csv"].as_str().expect("csv text");
    assert!(!text.contains('%'));
    let mut rdr = csv::Reader::from_reader(text.as_bytes());
    let headers = rdr.headers().expect("headers").clone();
    assert_eq!(
        headers.iter().collect::<Vec<_>>(),
        vec!["Name", "Maths", "Physics", "English", "Total Marks", "Percentage", "Grade"]
    );
    let parsed: Vec<csv::StringRecord> = rdr
        .records()
        .collect::<Result<_, _>>()
        .expect("parse records");
    assert_eq!(parsed.len(), rows.len());
    for (rec, (name, m, p, e)) in parsed.iter().zip(rows.iter()) {
        assert_eq!(&rec[0], *name);
        assert_eq!(rec[1].parse::<i64>().expect("maths"), *m);
        assert_eq!(rec[2].parse::<i64>().expect("physics"), *p);
        assert_eq!(rec[3].parse::<i64>().expect("english"), *e);
        assert_eq!(rec[4].parse::<i64>().expect("total"), m + p + e);
    }
    assert_eq!(&parsed[0][5], "92.33");
    assert_eq!(&parsed[0][6], "A");

    drop(stdin);
    let _ = child.wait();
}

#[test]
fn filtered_sorted_export_is_written_to_out_path() {
    let workspace = temp_dir("rosterd-export");
    let out = workspace.join("nested").join("student_results_filtered.csv");

    let (mut child, mut stdin, mut reader) = spawn_sidecar();
    for (id, name, m) in [("1", "f-mid", 30), ("2", "a", 95), ("3", "f-low", 10), ("4", "f-high", 50)] {
        let _ = request_ok(
            &mut stdin,
            &mut reader,
            id,
            "students.add",
            json!({ "name": name, "maths": m, "physics": m, "english": m }),
        );
    }

    let res = request_ok(
        &mut stdin,
        &mut reader,
        "5",
        "export.csv",
        json!({
            "gradeFilter": "F",
            "sort": "Ascending",
            "outPath": out.to_string_lossy(),
        }),
    );
    assert_eq!(res["rowsExported"], json!(3));
    assert_eq!(res["path"], json!(out.to_string_lossy()));

    let on_disk = std::fs::read_to_string(&out).expect("read export");
    assert_eq!(Some(on_disk.as_str()), res["csv"].as_str());
    let order: Vec<&str> = on_disk
        .lines()
        .skip(1)
        .map(|l| l.split(',').next().unwrap_or(""))
        .collect();
    assert_eq!(order, vec!["f-low", "f-mid", "f-high"]);

    drop(stdin);
    let _ = child.wait();
    let _ = std::fs::remove_dir_all(workspace);
}
