use crate::core::{Observation, Result};
use crate::utils::error::LpmError;

/// Encodes observations as CSV with a `x,y,value,group` header and no index
/// column.
pub fn encode_observations(observations: &[Observation]) -> Result<Vec<u8>> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());

    // Written explicitly so an empty dataset still gets its header.
    writer.write_record(["x", "y", "value", "group"])?;
    for observation in observations {
        writer.serialize(observation)?;
    }

    writer
        .into_inner()
        .map_err(|e| LpmError::IoError(e.into_error()))
}

pub fn decode_observations(data: &[u8]) -> Result<Vec<Observation>> {
    let mut reader = csv::Reader::from_reader(data);
    let observations = reader.deserialize().collect::<std::result::Result<Vec<Observation>, _>>()?;
    Ok(observations)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_and_rows() {
        let observations = vec![
            Observation {
                x: 1.5,
                y: -2.0,
                value: 0,
                group: "Group 1".to_string(),
            },
            Observation {
                x: 0.25,
                y: 7.0,
                value: 1,
                group: "Group 2".to_string(),
            },
        ];
        let text = String::from_utf8(encode_observations(&observations).unwrap()).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines, vec!["x,y,value,group", "1.5,-2.0,0,Group 1", "0.25,7.0,1,Group 2"]);
    }

    #[test]
    fn test_empty_dataset_keeps_header() {
        let text = String::from_utf8(encode_observations(&[]).unwrap()).unwrap();
        assert_eq!(text, "x,y,value,group\n");
    }

    #[test]
    fn test_labels_with_commas_are_quoted() {
        let observations = vec![Observation {
            x: 0.0,
            y: 0.0,
            value: 1,
            group: "North, East".to_string(),
        }];
        let bytes = encode_observations(&observations).unwrap();
        assert!(String::from_utf8_lossy(&bytes).contains("\"North, East\""));
        assert_eq!(decode_observations(&bytes).unwrap(), observations);
    }
}
