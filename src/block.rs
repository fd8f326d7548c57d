use serde::Serialize;

/// A named, indexed chunk of payload extracted from a container
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Block {
    pub name: String,
    pub index: u32,
    #[serde(skip)]
    pub data: Vec<u8>,
    // Diagnostic offsets, absolute within the container
    pub id_offset: usize,
    pub info_offset: usize,
    pub data_offset: usize,
}

impl Block {
    pub fn size(&self) -> usize {
        self.data.len()
    }

    /// Export file name, `{name}-{index}`
    pub fn file_name(&self) -> String {
        format!("{}-{}", self.name, self.index)
    }

    /// One line of the text dump
    pub fn summary(&self) -> String {
        format!(
            "{}.{:<3} = size:{:<7} | id@{:<7} | info@{:<7} | data@{:<7}",
            self.name,
            self.index,
            self.size(),
            self.id_offset,
            self.info_offset,
            self.data_offset
        )
    }
}
