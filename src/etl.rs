pub mod draw_map;
pub mod parse_osm;
pub mod tag_survey;

use log::{error, info};

use crate::errors::Result;

/// One pipeline stage: read its input, compute, write the result.
pub trait Etl {
    type Input;
    type Transformed;
    type Output;

    fn etl_name(&self) -> &str;

    fn extract(&mut self) -> Result<Self::Input>;
    fn transform(&mut self, input: Self::Input) -> Result<Self::Transformed>;
    fn load(&mut self, transformed: Self::Transformed) -> Result<Self::Output>;

    fn process(&mut self) -> Result<Self::Output> {
        info!(etl_name = self.etl_name(); "Starting ETL process");

        info!(etl_name = self.etl_name(); "Extracting");
        let input = match self.extract() {
            Ok(input) => Ok(input),
            Err(err) => {
                error!(
                    etl_name = self.etl_name(),
                    err = err.to_string().as_str();
                    "Extraction failed with error"
                );
                Err(err)
            }
        }?;

        info!(etl_name = self.etl_name(); "Transforming");
        let transformed = match self.transform(input) {
            Ok(transformed) => Ok(transformed),
            Err(err) => {
                error!(
                    etl_name = self.etl_name(),
                    err = err.to_string().as_str();
                    "Transformation failed with error"
                );
                Err(err)
            }
        }?;

        info!(etl_name = self.etl_name(); "Loading");
        let output = match self.load(transformed) {
            Ok(output) => Ok(output),
            Err(err) => {
                error!(
                    etl_name = self.etl_name(),
                    err = err.to_string().as_str();
                    "Loading failed with error"
                );
                Err(err)
            }
        }?;

        info!(etl_name = self.etl_name(); "Process finished");
        Ok(output)
    }
}
