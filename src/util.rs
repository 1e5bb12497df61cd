use glam::{Mat3, Mat4};

pub fn format_mat4(name: &str, mat: &Mat4) -> String {
    let mut output = String::new();

    output.push_str(&format!("{}:\n", name));

    for (label, col) in [
        ("x_axis", mat.x_axis),
        ("y_axis", mat.y_axis),
        ("z_axis", mat.z_axis),
        ("w_axis", mat.w_axis),
    ] {
        output.push_str(&format!(
            "{}: [{:8.3},{:8.3},{:8.3},{:8.3}]\n",
            label, col.x, col.y, col.z, col.w
        ));
    }

    output
}

pub fn format_mat3(name: &str, mat: &Mat3) -> String {
    let mut output = String::new();

    output.push_str(&format!("{}:\n", name));

    for (label, col) in [
        ("x_axis", mat.x_axis),
        ("y_axis", mat.y_axis),
        ("z_axis", mat.z_axis),
    ] {
        output.push_str(&format!(
            "{}: [{:8.3},{:8.3},{:8.3}]\n",
            label, col.x, col.y, col.z
        ));
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_columns() {
        let text = format_mat4("view", &Mat4::IDENTITY);
        assert!(text.starts_with("view:\n"));
        assert_eq!(text.lines().count(), 5);
        assert!(text.contains("w_axis: [   0.000,   0.000,   0.000,   1.000]"));

        let text = format_mat3("normal", &Mat3::IDENTITY);
        assert_eq!(text.lines().count(), 4);
        assert!(text.contains("y_axis: [   0.000,   1.000,   0.000]"));
    }
}
